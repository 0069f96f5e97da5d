pub mod framebuffer_view;
