//! Advisory text catalogue: one prompt template, score label and literal
//! fallback per rubric.
//!
//! Fallbacks are shown (and their scores stored) whenever generation fails,
//! so a panel is never empty.

use serde::Serialize;

use crate::design::DesignRequest;
use crate::scoring::SUSTAINABILITY_SCORE_LABEL;

/// Every kind of advisory text produced for a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// Overall sustainability score; drives the stored score.
    OverallScore,
    Recommendations,
    ZeroWastePattern,
    EcoDyes,
    CarbonFootprint,
    EthicalProduction,
    /// Care and end-of-life instructions served through the QR lookup.
    CareInstructions,
}

/// Advisories generated for every design, in display order.
pub const DESIGN_ADVISORIES: &[AdvisoryKind] = &[
    AdvisoryKind::OverallScore,
    AdvisoryKind::Recommendations,
    AdvisoryKind::ZeroWastePattern,
    AdvisoryKind::EcoDyes,
    AdvisoryKind::CarbonFootprint,
    AdvisoryKind::EthicalProduction,
];

impl AdvisoryKind {
    /// Panel title.
    pub fn title(self) -> &'static str {
        match self {
            Self::OverallScore => "Sustainability Score",
            Self::Recommendations => "Sustainability Analysis & Recommendations",
            Self::ZeroWastePattern => "Zero-Waste Pattern Details",
            Self::EcoDyes => "Sustainable Dyeing Options",
            Self::CarbonFootprint => "Environmental Impact Analysis",
            Self::EthicalProduction => "Ethical Manufacturing Guidelines",
            Self::CareInstructions => "Care & Sustainability Instructions",
        }
    }

    /// Label of the line carrying this rubric's score, if it has one.
    pub fn score_label(self) -> Option<&'static str> {
        match self {
            Self::OverallScore | Self::Recommendations => Some(SUSTAINABILITY_SCORE_LABEL),
            Self::ZeroWastePattern => Some("Zero-Waste Score:"),
            Self::EcoDyes => Some("Eco-Friendliness Score:"),
            Self::CarbonFootprint => Some("Carbon Footprint Score:"),
            Self::EthicalProduction => Some("Ethical Production Score:"),
            Self::CareInstructions => None,
        }
    }

    /// Score embedded in the fallback text.
    pub fn fallback_score(self) -> Option<i64> {
        match self {
            Self::OverallScore => Some(70),
            Self::Recommendations => Some(75),
            Self::ZeroWastePattern => Some(80),
            Self::EcoDyes => Some(85),
            Self::CarbonFootprint => Some(65),
            Self::EthicalProduction => Some(80),
            Self::CareInstructions => None,
        }
    }

    /// Build the prompt for this rubric.
    pub fn prompt(self, design: &DesignRequest) -> String {
        let materials = design.materials_text();
        match self {
            Self::OverallScore => format!(
                "Calculate a sustainability score (0-100) for a fashion design with the following characteristics:\n\
                 \n\
                 Materials: {materials}\n\
                 Production Method: {}\n\
                 Packaging: {}\n\
                 \n\
                 Consider factors such as:\n\
                 - Environmental impact of materials\n\
                 - Energy consumption in production\n\
                 - Water usage\n\
                 - Chemical use\n\
                 - Waste generation\n\
                 - Recyclability\n\
                 - Biodegradability\n\
                 \n\
                 Provide the numerical score (0-100) followed by a brief explanation.\n\
                 Format your response as follows:\n\
                 Sustainability Score: [score]\n\
                 Explanation:\n\
                 [Your brief explanation here]\n\
                 Emphasize sustainable fashion practices in your explanation.",
                design.production_method, design.packaging,
            ),
            Self::Recommendations => format!(
                "As a sustainable fashion expert, provide recommendations to improve the sustainability of the following design:\n\
                 \n\
                 Style: {}\n\
                 Materials: {materials}\n\
                 Clothing Type: {}\n\
                 Custom Design: {}\n\
                 Base Color: {}\n\
                 \n\
                 Consider the following aspects:\n\
                 1. Material substitutions for better sustainability\n\
                 2. Production process improvements\n\
                 3. Longevity and durability enhancements\n\
                 4. Ethical considerations\n\
                 5. Packaging and shipping optimizations\n\
                 \n\
                 Provide specific, actionable recommendations for each aspect.\n\
                 Also, provide a sustainability score (0-100) for these recommendations.\n\
                 \n\
                 Format your response as follows:\n\
                 Sustainability Score: [score]\n\
                 Recommendations:\n\
                 [Your detailed recommendations here]\n\
                 Remember to emphasize sustainable fashion practices throughout your response.",
                design.style,
                design.clothing_type,
                design.custom_design.as_deref().unwrap_or(""),
                design.base_color,
            ),
            Self::ZeroWastePattern => format!(
                "Generate a detailed description of a zero-waste pattern for a {} in {}. Include:\n\
                 \n\
                 1. Pattern layout\n\
                 2. Cutting instructions\n\
                 3. Assembly steps\n\
                 4. Tips for minimizing fabric waste\n\
                 \n\
                 The description should be suitable for an experienced fashion designer to follow.\n\
                 Also, provide a zero-waste score (0-100) for this pattern.\n\
                 \n\
                 Format your response as follows:\n\
                 Zero-Waste Score: [score]\n\
                 Pattern Description:\n\
                 [Your detailed pattern description here]\n\
                 Emphasize sustainable fashion practices throughout your response.",
                design.clothing_type, design.base_color,
            ),
            Self::EcoDyes => format!(
                "Suggest eco-friendly dye options for achieving a {} color in sustainable fashion. For each suggestion, provide:\n\
                 \n\
                 1. Dye name or source\n\
                 2. Environmental benefits\n\
                 3. Application process\n\
                 4. Potential limitations or considerations\n\
                 \n\
                 Focus on natural, low-impact, or innovative dyeing techniques.\n\
                 Provide an overall eco-friendliness score (0-100) for these dye suggestions.\n\
                 \n\
                 Format your response as follows:\n\
                 Eco-Friendliness Score: [score]\n\
                 Dye Suggestions: [Your detailed dye suggestions here]\n\
                 Emphasize sustainable fashion practices throughout your response.",
                design.base_color,
            ),
            Self::CarbonFootprint => format!(
                "Estimate the carbon footprint for a fashion item with the following characteristics:\n\
                 \n\
                 Materials: {materials}\n\
                 Production Location: {}\n\
                 Shipping Method: {}\n\
                 \n\
                 Provide:\n\
                 1. Estimated CO2 emissions (in kg CO2e)\n\
                 2. Breakdown of emissions by stage (materials, production, shipping)\n\
                 3. Suggestions for reducing the carbon footprint\n\
                 4. Overall carbon footprint score (0-100, where 100 is the lowest footprint)\n\
                 \n\
                 Base your estimates on typical industry data and provide a brief explanation of your calculation method.\n\
                 \n\
                 Format your response as follows:\n\
                 Carbon Footprint Score: [score]\n\
                 Estimate Details:\n\
                 [Your detailed carbon footprint estimate and suggestions here]\n\
                 Emphasize sustainable fashion practices throughout your response.",
                design.production_location, design.shipping_method,
            ),
            Self::EthicalProduction => format!(
                "Recommend ethical production options for fashion manufacturing in or near {}. For each recommendation, provide:\n\
                 \n\
                 1. Factory or company name\n\
                 2. Location\n\
                 3. Ethical certifications (e.g., Fair Trade, B Corp)\n\
                 4. Notable sustainable or ethical practices\n\
                 5. Types of garments or specialties\n\
                 \n\
                 Focus on facilities with strong labor practices, fair wages, and environmental consciousness.\n\
                 Provide an overall ethical production score (0-100) for these recommendations.\n\
                 \n\
                 Format your response as follows:\n\
                 Ethical Production Score: [score]\n\
                 Recommendations:\n\
                 [Your detailed ethical production recommendations here]\n\
                 Emphasize sustainable fashion practices throughout your response.",
                design.production_location,
            ),
            Self::CareInstructions => format!(
                "Write care and end-of-life instructions for a {} {} made from {materials} in {}.\n\
                 \n\
                 Cover:\n\
                 1. Washing and drying\n\
                 2. Repair and maintenance to extend its lifespan\n\
                 3. Recycling, upcycling or composting at end of life\n\
                 \n\
                 Keep it short and practical, as a plain list suitable for a garment care page.",
                design.style.to_lowercase(),
                design.clothing_type.to_lowercase(),
                design.base_color.to_lowercase(),
            ),
        }
    }

    /// Literal text shown when generation fails.
    pub fn fallback(self, design: &DesignRequest) -> String {
        match self {
            Self::OverallScore => "Sustainability Score: 70\n\
                 Explanation:\n\
                 The design uses eco-friendly materials and sustainable packaging, reducing environmental impact. \
                 Local production methods further lower emissions, though improvements in water usage could enhance the score."
                .to_string(),
            Self::Recommendations => "Sustainability Score: 75\n\
                 Recommendations:\n\
                 - Use organic or recycled materials like hemp or Tencel to reduce environmental impact.\n\
                 - Opt for local production to minimize transport emissions.\n\
                 - Design for durability with reinforced stitching.\n\
                 - Ensure fair labor practices by choosing certified manufacturers.\n\
                 - Use compostable packaging to reduce waste."
                .to_string(),
            Self::ZeroWastePattern => "Zero-Waste Score: 80\n\
                 Pattern Description:\n\
                 - Layout: Arrange pattern pieces to fit within a single fabric rectangle, minimizing gaps.\n\
                 - Cutting: Use precise cuts to avoid excess fabric; repurpose scraps for accessories.\n\
                 - Assembly: Sew pieces with minimal seam allowances to reduce waste.\n\
                 - Tips: Use digital pattern-making tools to optimize fabric use."
                .to_string(),
            Self::EcoDyes => "Eco-Friendliness Score: 85\n\
                 Dye Suggestions:\n\
                 - Natural dyes (e.g., indigo): Biodegradable, low water use; apply via soaking; limited color range.\n\
                 - Low-impact fiber-reactive dyes: Reduced chemical use; cold-water dyeing process; requires careful disposal."
                .to_string(),
            Self::CarbonFootprint => "Carbon Footprint Score: 65\n\
                 Estimate Details:\n\
                 - Estimated CO2: ~5 kg CO2e\n\
                 - Breakdown: Materials (40%), Production (30%), Shipping (30%)\n\
                 - Suggestions: Use local materials, renewable energy in production, and sea freight for shipping."
                .to_string(),
            Self::EthicalProduction => format!(
                "Ethical Production Score: 80\n\
                 Recommendations:\n\
                 - Choose factories with Fair Trade certification in {}, ensuring fair wages and safe working conditions.\n\
                 - Partner with local cooperatives specializing in sustainable garments, focusing on eco-friendly production.",
                design.production_location,
            ),
            Self::CareInstructions => format!(
                "- Wash cold on a gentle cycle and line dry to save energy.\n\
                 - Repair small tears early; mend seams and replace buttons rather than discarding.\n\
                 - At end of life, take this {} ({}) to a textile recycling point or repurpose the fabric.",
                design.clothing_type.to_lowercase(),
                design.materials_text(),
            ),
        }
    }
}

/// Remove every emphasis marker (`*`) from generated text.
pub fn strip_emphasis(text: &str) -> String {
    text.replace('*', "")
}
