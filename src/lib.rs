//! ogcard renders a fixed-size social-media card PNG.
//!
//! One run is a single linear pass over a [`Canvas`]:
//!
//! 1. **Background**: decode a PNG/JPEG and blit it unscaled at the origin
//! 2. **Overlay**: fill a translucent panel inset from the edges
//! 3. **Site link**: one muted line anchored to the bottom-left
//! 4. **Title**: word-wrapped headline with a drop shadow, rejected if too tall
//! 5. **Avatar**: resize, crop through a [`CircleMask`], place with optional tilt and ring
//! 6. **Output**: encode the canvas as PNG
//!
//! Every parameter lives in [`CardConfig`]; its defaults reproduce the stock 1200×628 card.
//! Library steps return [`CardResult`]; [`run`] and [`render_card`] add step context with
//! `anyhow`, and the typed [`CardError`] stays reachable via `downcast_ref`.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;
mod pipeline;
mod render;

pub use assets::decode::{SupportedFormat, decode_image, load_image, sniff_format};
pub use assets::encode::{encode_png, write_png};
pub use assets::font::{FontFace, TextLayoutEngine};
pub use config::{
    AvatarAnchor, AvatarBorder, AvatarPlacement, AvatarStyle, CardConfig, LayoutVariant,
    OverlayStyle, SiteLinkStyle, TitleStyle,
};
pub use foundation::core::{Affine, CanvasSize, Point, Rgba8, Vec2};
pub use foundation::error::{CardError, CardResult};
pub use pipeline::{render_card, run};
pub use render::avatar::{
    crop_circle, draw_avatar, load_avatar, place_avatar, resize_to_width, resized_height,
};
pub use render::background::{draw_background, draw_overlay};
pub use render::canvas::{Canvas, TextAlign};
pub use render::mask::{CircleMask, apply_circle_mask};
pub use render::text::{draw_site_link, draw_title, title_block_height, validate_title_height};
