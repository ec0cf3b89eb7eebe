// pricetag/src/enricher/mapping.rs

//! Catalog payload -> product form field mapping.

use crate::enricher::payload::EnrichmentPayload;
use crate::form::{ProductField, ProductForm};

/// The values a payload would write, in application order.
///
/// Only fields with a usable value appear; a field the payload says nothing
/// about is left out so the form keeps whatever it already had.
pub fn planned_updates(payload: &EnrichmentPayload, locale: &str) -> Vec<(ProductField, String)> {
  let image = payload.image_front_url();
  let brand = payload.brands();
  let name = payload
    .localized("product_name", locale)
    .or_else(|| payload.product_name());
  let description = payload
    .localized("generic_name", locale)
    .or_else(|| payload.generic_name())
    .or_else(|| payload.categories());

  [
    (ProductField::ImageUrl, image),
    (ProductField::Brand, brand),
    (ProductField::Name, name),
    (ProductField::Description, description),
  ]
  .into_iter()
  .filter_map(|(field, value)| value.map(|v| (field, v.to_string())))
  .collect()
}

/// Writes the payload onto `form` and returns the fields that were written.
///
/// Each field is overwritten, never appended to, so applying the same payload
/// again leaves the form unchanged.
pub fn apply_payload(form: &mut ProductForm, payload: &EnrichmentPayload, locale: &str) -> Vec<ProductField> {
  planned_updates(payload, locale)
    .into_iter()
    .map(|(field, value)| {
      form.set(field, value);
      field
    })
    .collect()
}
