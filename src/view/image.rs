//! Image leaf.
//!
//! Content size follows the image dimensions; the image is drawn scaled into
//! the active box. Images center themselves unless told otherwise.

use super::config::ViewConfig;
use super::view::{Defaults, View, ViewKind};
use crate::pane::ImageData;
use crate::reactive::Prop;

impl View {
    /// A leaf showing `image`. Bind a [`Slot`](crate::reactive::Slot) to swap
    /// the picture live.
    pub fn image(image: impl Into<Prop<Option<ImageData>>>, config: ViewConfig) -> Self {
        let view = Self::build("Image", ViewKind::Leaf, config, Defaults::CENTER);
        let image = image.into().into_slot();

        let weak = view.downgrade();
        image.observe_owned(view.owner(), move |data: &Option<ImageData>| {
            if let Some(view) = View::upgrade(&weak) {
                view.fit_content(data.as_ref());
            }
        });
        image.with(|data| view.fit_content(data.as_ref()));

        view.on_draw(move |painter, active| {
            image.with(|data| {
                if let Some(data) = data {
                    painter.blit(active, data);
                }
            });
        });
        view
    }

    fn fit_content(&self, data: Option<&ImageData>) {
        self.set_content_width(data.map(|d| d.width() as f32));
        self.set_content_height(data.map(|d| d.height() as f32));
    }
}
