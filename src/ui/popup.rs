use crate::{data::listing::Listing, traits::PopupRenderer};

/// Rendered popup body attached to a marker.
///
/// Opaque to the map: it only stores the content and counts how many times
/// the host asked it to refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupView {
    listing_id: Option<String>,
    content: String,
    revision: u64,
}

impl PopupView {
    /// Popup with no content, used for click markers
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(listing_id: Option<String>, content: String) -> Self {
        Self {
            listing_id,
            content,
            revision: 0,
        }
    }

    pub fn listing_id(&self) -> Option<&str> {
        self.listing_id.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Marks the view as refreshed after its inputs changed
    pub fn detect_changes(&mut self) {
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Default popup: title, category, address and price, one per line.
#[derive(Debug, Clone, Default)]
pub struct ListingPopupRenderer;

impl PopupRenderer for ListingPopupRenderer {
    fn render(&self, listing: &Listing) -> PopupView {
        let mut lines = Vec::with_capacity(4);
        let title = if listing.title.is_empty() {
            listing.id.as_str()
        } else {
            listing.title.as_str()
        };
        lines.push(title.to_string());
        lines.push(listing.property_type.to_string());
        if let Some(address) = &listing.address {
            lines.push(address.clone());
        }
        if let Some(price) = listing.price {
            lines.push(format!("{:.2}", price));
        }

        let mut view = PopupView::new(Some(listing.id.clone()), lines.join("\n"));
        view.detect_changes();
        view
    }
}
