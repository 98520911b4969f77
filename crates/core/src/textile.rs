//! Innovative textile generator: option lists, request resolution and the
//! generation prompt.

use serde::{Deserialize, Serialize};

use crate::catalog::{resolve_choice, resolve_multi_choice, OTHER};
use crate::error::CoreError;

pub const BASE_MATERIALS: &[&str] = &[
    "Organic Cotton",
    "Recycled Polyester",
    "Organic Hemp",
    "Bamboo",
    "Lyocell (Tencel)",
    "Recycled Nylon",
    "Organic Linen",
    "Pineapple Leather",
    "Mushroom Leather",
    "Seaweed Fiber",
    OTHER,
];

pub const PROPERTY_OPTIONS: &[&str] = &[
    "Water-resistant",
    "Breathable",
    "Stretchy",
    "Wrinkle-resistant",
    "UV-protective",
    "Antibacterial",
    "Moisture-wicking",
    "Thermal-regulating",
    "Odor-resistant",
    "Quick-drying",
    "Biodegradable",
    "Hypoallergenic",
    OTHER,
];

pub const SUSTAINABILITY_GOALS: &[&str] = &[
    "Biodegradable",
    "Low water usage",
    "Energy-efficient production",
    "Recyclable",
    "Zero-waste manufacturing",
    "Non-toxic dyes",
    "Carbon-neutral",
    "Locally sourced",
    "Closed-loop production",
    "Regenerative agriculture",
    OTHER,
];

pub const TEXTILE_PRODUCTION_METHODS: &[&str] = &[
    "Weaving",
    "Knitting",
    "Non-woven",
    "3D Printing",
    "Electrospinning",
    "Nanotechnology",
    "Biotechnology",
    OTHER,
];

pub const TARGET_MARKETS: &[&str] = &[
    "Activewear",
    "Casual wear",
    "Formal wear",
    "Outdoor gear",
    "Medical textiles",
    "Industrial use",
    "Home furnishings",
    OTHER,
];

/// Upper bound for both properties and goals.
pub const MAX_MULTI_SELECTIONS: usize = 4;

/// Follow-up steps shown after a textile is generated.
pub const NEXT_STEPS: &[&str] = &[
    "Review the step-by-step creation guide provided above.",
    "Consult with material scientists to refine and validate the concept.",
    "Conduct feasibility studies and small-scale prototyping.",
    "Assess the lifecycle impact of this new textile.",
    "Explore partnerships with innovative sustainable manufacturers.",
    "Test the textile's performance and sustainability claims for the target market.",
    "Consider patenting unique aspects of your innovative textile.",
];

/// Option lists for the textile form.
#[derive(Debug, Clone, Serialize)]
pub struct TextileOptions {
    pub base_materials: &'static [&'static str],
    pub properties: &'static [&'static str],
    pub sustainability_goals: &'static [&'static str],
    pub production_methods: &'static [&'static str],
    pub target_markets: &'static [&'static str],
    pub max_selections: usize,
}

pub fn textile_options() -> TextileOptions {
    TextileOptions {
        base_materials: BASE_MATERIALS,
        properties: PROPERTY_OPTIONS,
        sustainability_goals: SUSTAINABILITY_GOALS,
        production_methods: TEXTILE_PRODUCTION_METHODS,
        target_markets: TARGET_MARKETS,
        max_selections: MAX_MULTI_SELECTIONS,
    }
}

/// Raw textile form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextileSelections {
    pub base_material: String,
    pub custom_base_material: Option<String>,
    pub desired_properties: Vec<String>,
    pub custom_property: Option<String>,
    pub sustainability_goals: Vec<String>,
    pub custom_goal: Option<String>,
    pub production_method: String,
    pub custom_production_method: Option<String>,
    pub target_market: String,
    pub custom_target_market: Option<String>,
    #[serde(default)]
    pub additional_requirements: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextileRequest {
    pub base_material: String,
    pub desired_properties: Vec<String>,
    pub sustainability_goals: Vec<String>,
    pub production_method: String,
    pub target_market: String,
    pub additional_requirements: String,
}

impl TextileSelections {
    pub fn resolve(&self) -> Result<TextileRequest, CoreError> {
        Ok(TextileRequest {
            base_material: resolve_choice(
                "base material",
                BASE_MATERIALS,
                &self.base_material,
                self.custom_base_material.as_deref(),
            )?,
            desired_properties: resolve_multi_choice(
                "desired properties",
                PROPERTY_OPTIONS,
                &self.desired_properties,
                self.custom_property.as_deref(),
                1,
                MAX_MULTI_SELECTIONS,
            )?,
            sustainability_goals: resolve_multi_choice(
                "sustainability goals",
                SUSTAINABILITY_GOALS,
                &self.sustainability_goals,
                self.custom_goal.as_deref(),
                1,
                MAX_MULTI_SELECTIONS,
            )?,
            production_method: resolve_choice(
                "production method",
                TEXTILE_PRODUCTION_METHODS,
                &self.production_method,
                self.custom_production_method.as_deref(),
            )?,
            target_market: resolve_choice(
                "target market",
                TARGET_MARKETS,
                &self.target_market,
                self.custom_target_market.as_deref(),
            )?,
            additional_requirements: self.additional_requirements.trim().to_string(),
        })
    }
}

impl TextileRequest {
    pub fn prompt(&self) -> String {
        format!(
            "Create a completely new and unique innovative textile based on the following inputs:\n\n\
             Base Material: {base}\n\
             Desired Properties: {properties}\n\
             Sustainability Goals: {goals}\n\
             Additional Requirements: {extra}\n\
             Production Method: {method}\n\
             Target Market: {market}\n\n\
             Generate a detailed description of a novel, never-before-seen textile that:\n\
             1. Uses the base material as a starting point but transforms it in an unprecedented way\n\
             2. Incorporates the desired properties through innovative techniques\n\
             3. Meets and exceeds the specified sustainability goals\n\
             4. Significantly improves durability and reduces environmental impact beyond current standards\n\
             5. Requires fewer resources in production through groundbreaking processes\n\
             6. Includes cutting-edge biodegradable materials or treatments that cause minimal environmental damage\n\
             7. Addresses the additional requirements provided with unique solutions\n\
             8. Revolutionizes the specified production method\n\
             9. Sets new standards for sustainability and performance in the target market\n\n\
             Provide the following information:\n\
             - Unique composition and structure of the new textile\n\
             - Innovative features and the novel methods used to achieve them\n\
             - Groundbreaking environmental benefits and resource usage reduction techniques\n\
             - Potential applications in fashion or other industries, highlighting its versatility\n\
             - Any special care or end-of-life considerations that set this textile apart\n\
             - Specific, unique treatments or processes that enhance biodegradability or reduce environmental damage\n\
             - How the textile meets and exceeds the needs of the target market while setting new sustainability benchmarks\n\n\
             Additionally, provide a step-by-step guide on how to create this innovative textile:\n\
             1. Detailed instructions for preparing the base material\n\
             2. Specific processes for incorporating the unique properties\n\
             3. Novel techniques for achieving the sustainability goals\n\
             4. Step-by-step explanation of the innovative production method\n\
             5. Guidelines for quality control and testing to ensure the textile meets its groundbreaking standards\n\n\
             Format the response as a detailed, well-structured description of the innovative textile, \
             followed by the step-by-step creation guide. Ensure that every aspect of this textile is \
             presented as a new and unique innovation in the field of sustainable textiles.",
            base = self.base_material,
            properties = self.desired_properties.join(", "),
            goals = self.sustainability_goals.join(", "),
            extra = self.additional_requirements,
            method = self.production_method,
            market = self.target_market,
        )
    }
}
