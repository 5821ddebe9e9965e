pub mod pdf_options;
