//! Design request value objects.
//!
//! [`DesignSelections`] is the raw form input; [`DesignSelections::resolve`]
//! turns it into a [`DesignRequest`], the value passed through generation
//! and persistence.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    resolve_choice, resolve_multi_choice, BASE_COLORS, CLOTHING_TYPES, MATERIALS, MAX_MATERIALS,
    PACKAGING_OPTIONS, PRODUCTION_LOCATIONS, PRODUCTION_METHODS, SHIPPING_METHODS, STYLES,
};
use crate::error::CoreError;

/// Separator used when materials are stored as a single text column.
pub const MATERIALS_SEPARATOR: &str = ", ";

/// Maximum length of the optional custom design note.
pub const MAX_CUSTOM_DESIGN_LENGTH: usize = 2_000;

/// Raw design form input: each field is a selected option plus an optional
/// free-text override used when the option is `"Other"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesignSelections {
    pub style: String,
    pub custom_style: Option<String>,
    pub materials: Vec<String>,
    pub custom_material: Option<String>,
    pub clothing_type: String,
    pub custom_clothing_type: Option<String>,
    pub production_method: String,
    pub custom_production_method: Option<String>,
    pub packaging: String,
    pub custom_packaging: Option<String>,
    pub production_location: String,
    pub custom_production_location: Option<String>,
    pub shipping_method: String,
    pub custom_shipping_method: Option<String>,
    pub base_color: String,
    pub custom_base_color: Option<String>,
    pub custom_design: Option<String>,
}

/// A fully-resolved design request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub style: String,
    pub materials: Vec<String>,
    pub clothing_type: String,
    pub production_method: String,
    pub packaging: String,
    pub production_location: String,
    pub shipping_method: String,
    pub base_color: String,
    pub custom_design: Option<String>,
}

impl DesignSelections {
    /// Validate every field against its option list and apply overrides.
    pub fn resolve(&self) -> Result<DesignRequest, CoreError> {
        let custom_design = self
            .custom_design
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string);

        if let Some(note) = &custom_design {
            if note.chars().count() > MAX_CUSTOM_DESIGN_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Custom design description exceeds maximum length of {MAX_CUSTOM_DESIGN_LENGTH} characters"
                )));
            }
        }

        Ok(DesignRequest {
            style: resolve_choice("style", STYLES, &self.style, self.custom_style.as_deref())?,
            materials: resolve_multi_choice(
                "materials",
                MATERIALS,
                &self.materials,
                self.custom_material.as_deref(),
                1,
                MAX_MATERIALS,
            )?,
            clothing_type: resolve_choice(
                "clothing type",
                CLOTHING_TYPES,
                &self.clothing_type,
                self.custom_clothing_type.as_deref(),
            )?,
            production_method: resolve_choice(
                "production method",
                PRODUCTION_METHODS,
                &self.production_method,
                self.custom_production_method.as_deref(),
            )?,
            packaging: resolve_choice(
                "packaging",
                PACKAGING_OPTIONS,
                &self.packaging,
                self.custom_packaging.as_deref(),
            )?,
            production_location: resolve_choice(
                "production location",
                PRODUCTION_LOCATIONS,
                &self.production_location,
                self.custom_production_location.as_deref(),
            )?,
            shipping_method: resolve_choice(
                "shipping method",
                SHIPPING_METHODS,
                &self.shipping_method,
                self.custom_shipping_method.as_deref(),
            )?,
            base_color: resolve_choice(
                "base color",
                BASE_COLORS,
                &self.base_color,
                self.custom_base_color.as_deref(),
            )?,
            custom_design,
        })
    }
}

impl DesignRequest {
    /// Materials joined for display and storage.
    pub fn materials_text(&self) -> String {
        join_materials(&self.materials)
    }

    /// Build the text-to-image prompt for this design.
    pub fn image_prompt(&self) -> String {
        let style = self.style.to_lowercase();
        let clothing_type = self.clothing_type.to_lowercase();
        let color = self.base_color.to_lowercase();
        let materials = self.materials_text().to_lowercase();

        let mut prompt = format!(
            "A sustainable {style} {clothing_type} in {color} color made from {materials}. \
             The primary color of the garment is {color}. Highly detailed fashion design with \
             emphasis on eco-friendly features and ethical production. Show the garment in a \
             natural, environmentally conscious setting."
        );
        if let Some(note) = &self.custom_design {
            prompt.push(' ');
            prompt.push_str(note);
        }
        prompt
    }
}

/// Join materials with [`MATERIALS_SEPARATOR`].
pub fn join_materials(materials: &[String]) -> String {
    materials.join(MATERIALS_SEPARATOR)
}

/// Split stored materials text back into entries.
///
/// Lossy when a custom material itself contains the separator.
pub fn split_materials(text: &str) -> Vec<String> {
    text.split(MATERIALS_SEPARATOR)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
