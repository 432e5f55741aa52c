pub mod form_renderer;
