mod body;
mod footer;
mod header;
mod layout;
mod notice;
mod sections;

pub use body::render_body;
pub use footer::render_footer;
pub use header::{header_height, render_header};
pub use notice::render_notice;
pub use sections::render_section_strip;

#[cfg(test)]
pub(crate) use body::scroll_offset;
#[cfg(test)]
pub(crate) use sections::visible_window;
