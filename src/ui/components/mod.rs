pub mod kpi_card;
pub mod markdown_box_plot;
pub mod revenue_chart;
pub mod revenue_indicator;
pub mod source_picker;
pub mod toast;
