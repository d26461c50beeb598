mod components;
mod renderer;
mod view;

pub use renderer::{
    CursorHint, FieldRender, FieldRenderer, InternalRenderer, PublicRenderer, renderer_for,
};
pub use view::{NoticeRender, UiContext, draw};

#[cfg(test)]
pub(crate) use components::{scroll_offset, visible_window};
