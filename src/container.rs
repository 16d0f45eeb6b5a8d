use blockdrag_core::ContainerRect;
use web_sys::{DomRect, Element};

pub trait HasClientRect {
    fn client_rect(&self) -> DomRect;
    /// Inner size without borders or scrollbars.
    fn client_size(&self) -> (f64, f64);
}

impl HasClientRect for Element {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }

    fn client_size(&self) -> (f64, f64) {
        (self.client_width() as f64, self.client_height() as f64)
    }
}

pub fn container_rect(element: &impl HasClientRect) -> ContainerRect {
    let rect = element.client_rect();
    let (client_width, client_height) = element.client_size();
    ContainerRect::new(rect.left(), rect.top(), rect.width(), rect.height())
        .with_client_size(client_width, client_height)
}

/// `None` while the container has not been attached yet.
pub fn attached_container_rect(element: Option<&Element>) -> Option<ContainerRect> {
    element.map(container_rect)
}
