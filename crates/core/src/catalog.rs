//! Fixed option lists offered by the design form, and resolution of a
//! selected option (with its optional free-text override) into the value
//! that gets stored.

use serde::Serialize;

use crate::error::CoreError;

/// Sentinel option that switches a field to its free-text override.
pub const OTHER: &str = "Other";

// ---------------------------------------------------------------------------
// Design studio options
// ---------------------------------------------------------------------------

pub const STYLES: &[&str] = &[
    "Casual",
    "Formal",
    "Sporty",
    "Vintage",
    "Bohemian",
    "Minimalist",
    "Avant-garde",
    "Streetwear",
    "Romantic",
    "Preppy",
    OTHER,
];

pub const MATERIALS: &[&str] = &[
    "Organic Cotton",
    "Recycled Polyester",
    "Hemp",
    "Tencel",
    "Bamboo",
    "Cork",
    "Recycled Nylon",
    "Piñatex",
    "Econyl",
    "Recycled Wool",
    "Organic Linen",
    "Soy Fabric",
    "Qmilk",
    "Orange Fiber",
    "Recycled Denim",
    OTHER,
];

pub const CLOTHING_TYPES: &[&str] = &[
    "Shirt",
    "Dress",
    "Pants",
    "Jacket",
    "Skirt",
    "Sweater",
    "Jumpsuit",
    "Coat",
    "Blouse",
    "Shorts",
    "Cardigan",
    "Hoodie",
    "T-Shirt",
    "Crop Top",
    OTHER,
];

pub const PRODUCTION_METHODS: &[&str] = &[
    "Cut-and-Sew",
    "Fully Fashioned Knitting",
    "Seamless Knitting",
    "3D Printing",
    "Zero Waste Pattern Cutting",
    "Upcycling",
    OTHER,
];

pub const PACKAGING_OPTIONS: &[&str] = &[
    "Recycled Cardboard",
    "Compostable Mailers",
    "Reusable Fabric Bags",
    "Minimal Packaging",
    "Plastic-free Packaging",
    OTHER,
];

pub const PRODUCTION_LOCATIONS: &[&str] = &[
    "Local (within 100 miles)",
    "Domestic",
    "Nearshore",
    "Offshore",
    OTHER,
];

pub const SHIPPING_METHODS: &[&str] = &[
    "Ground Shipping",
    "Air Freight",
    "Sea Freight",
    "Hybrid (Sea + Ground)",
    OTHER,
];

pub const BASE_COLORS: &[&str] = &[
    "White", "Black", "Red", "Blue", "Green", "Yellow", "Purple", "Pink", "Orange", "Brown",
    "Gray", OTHER,
];

/// Maximum number of materials a design may combine.
pub const MAX_MATERIALS: usize = 3;

/// Every option list of the design form, keyed by field name.
#[derive(Debug, Clone, Serialize)]
pub struct DesignOptions {
    pub styles: &'static [&'static str],
    pub materials: &'static [&'static str],
    pub clothing_types: &'static [&'static str],
    pub production_methods: &'static [&'static str],
    pub packaging_options: &'static [&'static str],
    pub production_locations: &'static [&'static str],
    pub shipping_methods: &'static [&'static str],
    pub base_colors: &'static [&'static str],
    pub max_materials: usize,
}

/// The design form's option lists.
pub fn design_options() -> DesignOptions {
    DesignOptions {
        styles: STYLES,
        materials: MATERIALS,
        clothing_types: CLOTHING_TYPES,
        production_methods: PRODUCTION_METHODS,
        packaging_options: PACKAGING_OPTIONS,
        production_locations: PRODUCTION_LOCATIONS,
        shipping_methods: SHIPPING_METHODS,
        base_colors: BASE_COLORS,
        max_materials: MAX_MATERIALS,
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve one selected option into its stored value.
///
/// - A listed option (other than [`OTHER`]) is returned as-is.
/// - [`OTHER`] is replaced by the trimmed `custom` text, which must be non-empty.
/// - Anything else is rejected.
pub fn resolve_choice(
    field: &str,
    options: &[&str],
    selected: &str,
    custom: Option<&str>,
) -> Result<String, CoreError> {
    if selected == OTHER {
        return match custom.map(str::trim).filter(|c| !c.is_empty()) {
            Some(text) => Ok(text.to_string()),
            None => Err(CoreError::Validation(format!(
                "Please specify a value for {field} when selecting '{OTHER}'"
            ))),
        };
    }

    if options.contains(&selected) {
        Ok(selected.to_string())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{selected}'. Must be one of: {}",
            options.join(", ")
        )))
    }
}

/// Resolve a multi-select field: every entry is resolved with
/// [`resolve_choice`] against the same `custom` override, and the count must
/// fall within `min..=max`.
pub fn resolve_multi_choice(
    field: &str,
    options: &[&str],
    selected: &[String],
    custom: Option<&str>,
    min: usize,
    max: usize,
) -> Result<Vec<String>, CoreError> {
    if selected.len() < min || selected.len() > max {
        return Err(CoreError::Validation(format!(
            "Select between {min} and {max} {field} (got {})",
            selected.len()
        )));
    }

    let mut resolved: Vec<String> = Vec::with_capacity(selected.len());
    for choice in selected {
        let value = resolve_choice(field, options, choice, custom)?;
        if resolved.contains(&value) {
            return Err(CoreError::Validation(format!(
                "Duplicate {field} '{value}'"
            )));
        }
        resolved.push(value);
    }
    Ok(resolved)
}
