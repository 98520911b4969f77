//! Sustainable production optimizer: form options, validation and the
//! recommendations prompt.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const CLIMATE_ZONES: &[&str] = &[
    "Tropical",
    "Dry (Arid and Semi-arid)",
    "Temperate",
    "Continental",
    "Polar",
];

pub const MANUFACTURING_METHODS: &[&str] = &[
    "Traditional Mass Production",
    "Automated/Smart Factory",
    "Slow Fashion",
    "Artisanal/Handmade",
    "On-Demand Production",
    "Semi-Automated",
    "Modular Production",
];

pub const PRODUCTION_SCALES: &[&str] = &[
    "Small (< 1,000 units/month)",
    "Medium (1,000 - 10,000 units/month)",
    "Large (10,000 - 100,000 units/month)",
    "Very Large (> 100,000 units/month)",
];

pub const ENERGY_SOURCES: &[&str] = &[
    "Grid Electricity",
    "Natural Gas",
    "Coal",
    "Solar",
    "Wind",
    "Hydroelectric",
    "Biomass",
    "Geothermal",
    "Nuclear",
    "Diesel Generators",
];

pub const WATER_SOURCES: &[&str] = &[
    "Municipal Supply",
    "Groundwater",
    "Rainwater Harvesting",
    "Recycled Water",
    "Surface Water (Rivers/Lakes)",
    "Desalination",
];

pub const PRODUCTION_MATERIALS: &[&str] = &[
    "Cotton",
    "Organic Cotton",
    "Recycled Cotton",
    "Polyester",
    "Recycled Polyester",
    "Nylon",
    "Recycled Nylon",
    "Wool",
    "Recycled Wool",
    "Leather",
    "Vegan Leather",
    "Silk",
    "Peace Silk",
    "Linen",
    "Hemp",
    "Bamboo",
    "Viscose",
    "Lyocell",
    "Modal",
    "Acrylic",
    "Elastane",
    "Recycled Plastics",
    "Bioplastics",
    "Cork",
    "Piñatex (Pineapple Leather)",
    "Mushroom Leather",
    "Seacell",
    "Econyl",
];

pub const CHEMICALS: &[&str] = &[
    "Synthetic Dyes",
    "Natural Dyes",
    "Bleaches",
    "Solvents",
    "Finishes",
    "Adhesives",
    "Tanning Agents",
    "Fixing Agents",
    "Softeners",
    "Water Repellents",
    "Flame Retardants",
    "Enzyme Treatments",
    "None",
];

pub const WASTE_MANAGEMENT: &[&str] = &[
    "Recycling",
    "Composting",
    "Landfill",
    "Incineration",
    "Upcycling",
    "Zero-waste initiatives",
    "Wastewater Treatment",
    "Hazardous Waste Management",
    "Fabric Scrap Reuse",
    "Donate Excess Materials",
];

pub const TRANSPORTATION: &[&str] = &[
    "Truck",
    "Ship",
    "Air Freight",
    "Rail",
    "Local suppliers (minimal transportation)",
    "Electric Vehicles",
    "Hybrid Vehicles",
    "Cargo Bikes (for local delivery)",
    "Consolidated Shipping",
];

pub const CERTIFICATIONS: &[&str] = &[
    "GOTS (Global Organic Textile Standard)",
    "Fairtrade",
    "OEKO-TEX",
    "Bluesign",
    "Cradle to Cradle",
    "ISO 14001",
    "SA8000",
    "Better Cotton Initiative (BCI)",
    "Leather Working Group (LWG)",
    "Forest Stewardship Council (FSC)",
    "REACH Compliance",
    "Fair Wear Foundation",
    "Carbon Trust Standard",
    "B Corp Certification",
    "None",
];

pub const PACKAGING_MATERIALS: &[&str] = &[
    "Plastic",
    "Recycled Plastic",
    "Cardboard",
    "Recycled Cardboard",
    "Paper",
    "Recycled Paper",
    "Biodegradable Plastics",
    "Compostable Materials",
    "Reusable Packaging",
    "Minimal Packaging",
    "Fabric Bags",
    "Plant-based Packaging",
];

pub const WORKER_WELFARE: &[&str] = &[
    "Fair Wages",
    "Safe Working Conditions",
    "Regular Health Check-ups",
    "Worker Education Programs",
    "Child Care Facilities",
    "Mental Health Support",
    "Freedom of Association",
    "Grievance Mechanisms",
    "Diversity and Inclusion Programs",
    "None",
];

pub const TECHNOLOGY: &[&str] = &[
    "3D Design Software",
    "AI for Demand Forecasting",
    "IoT for Equipment Monitoring",
    "Blockchain for Supply Chain Transparency",
    "Digital Printing",
    "Laser Cutting",
    "Automated Cutting Machines",
    "Robotic Sewing",
    "Virtual Sampling",
    "ERP Systems",
    "None",
];

pub const COMMUNITY_ENGAGEMENT: &[&str] = &[
    "Local Hiring",
    "Skills Training Programs",
    "Educational Partnerships",
    "Community Recycling Programs",
    "Local Sourcing Initiatives",
    "Environmental Clean-up Events",
    "Open Factory Days",
    "Sponsorship of Local Events",
    "None",
];

pub const MAX_DAILY_WATER_LITERS: u32 = 1_000_000;
pub const DEFAULT_DAILY_WATER_LITERS: u32 = 10_000;

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOptions {
    pub climate_zones: &'static [&'static str],
    pub manufacturing_methods: &'static [&'static str],
    pub production_scales: &'static [&'static str],
    pub energy_sources: &'static [&'static str],
    pub water_sources: &'static [&'static str],
    pub materials: &'static [&'static str],
    pub chemicals: &'static [&'static str],
    pub waste_management: &'static [&'static str],
    pub transportation: &'static [&'static str],
    pub certifications: &'static [&'static str],
    pub packaging: &'static [&'static str],
    pub worker_welfare: &'static [&'static str],
    pub technology: &'static [&'static str],
    pub community_engagement: &'static [&'static str],
    pub max_daily_water_liters: u32,
    pub default_daily_water_liters: u32,
}

pub fn production_options() -> ProductionOptions {
    ProductionOptions {
        climate_zones: CLIMATE_ZONES,
        manufacturing_methods: MANUFACTURING_METHODS,
        production_scales: PRODUCTION_SCALES,
        energy_sources: ENERGY_SOURCES,
        water_sources: WATER_SOURCES,
        materials: PRODUCTION_MATERIALS,
        chemicals: CHEMICALS,
        waste_management: WASTE_MANAGEMENT,
        transportation: TRANSPORTATION,
        certifications: CERTIFICATIONS,
        packaging: PACKAGING_MATERIALS,
        worker_welfare: WORKER_WELFARE,
        technology: TECHNOLOGY,
        community_engagement: COMMUNITY_ENGAGEMENT,
        max_daily_water_liters: MAX_DAILY_WATER_LITERS,
        default_daily_water_liters: DEFAULT_DAILY_WATER_LITERS,
    }
}

fn default_water() -> u32 {
    DEFAULT_DAILY_WATER_LITERS
}

/// Production details submitted to the optimizer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductionDetails {
    /// Free text, usually "City, Country".
    pub location: String,
    pub climate_zone: String,
    pub manufacturing_method: String,
    pub production_scale: String,
    #[serde(default)]
    pub energy_sources: Vec<String>,
    #[serde(default = "default_water")]
    pub daily_water_liters: u32,
    #[serde(default)]
    pub water_sources: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub chemicals: Vec<String>,
    #[serde(default)]
    pub waste_management: Vec<String>,
    #[serde(default)]
    pub transportation: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub packaging: Vec<String>,
    #[serde(default)]
    pub worker_welfare: Vec<String>,
    #[serde(default)]
    pub technology: Vec<String>,
    #[serde(default)]
    pub community_engagement: Vec<String>,
}

fn check_one(field: &str, options: &[&str], value: &str) -> Result<(), CoreError> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            options.join(", ")
        )))
    }
}

fn check_many(field: &str, options: &[&str], values: &[String]) -> Result<(), CoreError> {
    values.iter().try_for_each(|v| check_one(field, options, v))
}

impl ProductionDetails {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.location.trim().is_empty() {
            return Err(CoreError::Validation("Production location is required".into()));
        }
        if self.daily_water_liters > MAX_DAILY_WATER_LITERS {
            return Err(CoreError::Validation(format!(
                "Daily water usage must be at most {MAX_DAILY_WATER_LITERS} liters"
            )));
        }
        check_one("climate zone", CLIMATE_ZONES, &self.climate_zone)?;
        check_one("manufacturing method", MANUFACTURING_METHODS, &self.manufacturing_method)?;
        check_one("production scale", PRODUCTION_SCALES, &self.production_scale)?;
        check_many("energy source", ENERGY_SOURCES, &self.energy_sources)?;
        check_many("water source", WATER_SOURCES, &self.water_sources)?;
        check_many("material", PRODUCTION_MATERIALS, &self.materials)?;
        check_many("chemical", CHEMICALS, &self.chemicals)?;
        check_many("waste management practice", WASTE_MANAGEMENT, &self.waste_management)?;
        check_many("transportation method", TRANSPORTATION, &self.transportation)?;
        check_many("certification", CERTIFICATIONS, &self.certifications)?;
        check_many("packaging material", PACKAGING_MATERIALS, &self.packaging)?;
        check_many("worker welfare initiative", WORKER_WELFARE, &self.worker_welfare)?;
        check_many("technology", TECHNOLOGY, &self.technology)?;
        check_many("community initiative", COMMUNITY_ENGAGEMENT, &self.community_engagement)?;
        Ok(())
    }

    /// The details block embedded in the recommendations prompt.
    pub fn summary(&self) -> String {
        format!(
            "Production Location: {}\n\
             Climate Zone: {}\n\
             Manufacturing Method: {}\n\
             Production Scale: {}\n\
             Energy Sources: {}\n\
             Daily Water Usage: {} liters\n\
             Water Sources: {}\n\
             Main Materials: {}\n\
             Chemicals Used: {}\n\
             Waste Management: {}\n\
             Transportation Methods: {}\n\
             Current Certifications: {}\n\
             Packaging Materials: {}\n\
             Worker Welfare Initiatives: {}\n\
             Technology Used: {}\n\
             Community Engagement: {}",
            self.location.trim(),
            self.climate_zone,
            self.manufacturing_method,
            self.production_scale,
            self.energy_sources.join(", "),
            self.daily_water_liters,
            self.water_sources.join(", "),
            self.materials.join(", "),
            self.chemicals.join(", "),
            self.waste_management.join(", "),
            self.transportation.join(", "),
            self.certifications.join(", "),
            self.packaging.join(", "),
            self.worker_welfare.join(", "),
            self.technology.join(", "),
            self.community_engagement.join(", "),
        )
    }

    pub fn prompt(&self) -> String {
        format!(
            "Based on the following production details for a fashion item:\n\n{details}\n\n\
             Provide comprehensive, location-specific recommendations for improving sustainability in the following areas:\n\
             1. Energy Usage: Suggest renewable energy alternatives and energy-efficient practices specific to the production location.\n\
             2. Water Conservation: Recommend water-saving techniques and water treatment methods considering local water scarcity issues.\n\
             3. Material Sourcing: Propose sustainable alternatives to traditional materials, considering local availability and climate conditions.\n\
             4. Supply Chain Optimization: Suggest ways to reduce transportation emissions and improve logistics based on the factory location.\n\
             5. Waste Reduction: Recommend strategies for minimizing waste in the production process, including local recycling and upcycling opportunities.\n\
             6. Chemical Usage: Suggest eco-friendly alternatives to harmful chemicals used in production, considering local regulations.\n\
             7. Labor Practices: Provide recommendations for ensuring fair and safe working conditions, taking into account local labor laws and cultural contexts.\n\
             8. Packaging: Suggest sustainable packaging alternatives and reduction strategies, considering local recycling infrastructure.\n\
             9. Certifications: Recommend relevant sustainability certifications to pursue, including any region-specific certifications.\n\
             10. Technology Integration: Propose innovative technologies that can enhance sustainability, considering local technological infrastructure and availability.\n\
             11. Climate Resilience: Suggest strategies to make the production process more resilient to local climate change impacts.\n\
             12. Community Engagement: Recommend ways to engage with and benefit the local community through sustainable practices.\n\n\
             For each area, provide specific, actionable recommendations tailored to the given production details and location.\n\
             Include potential environmental benefits and, where possible, estimated cost implications of implementing these changes.\n\
             Highlight the most important and impactful recommendations using **bold text**.\n\
             Consider local regulations, climate, resources, and cultural factors in your recommendations.",
            details = self.summary(),
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn details() -> ProductionDetails {
        ProductionDetails {
            location: "Porto, Portugal".into(),
            climate_zone: "Temperate".into(),
            manufacturing_method: "Slow Fashion".into(),
            production_scale: PRODUCTION_SCALES[0].into(),
            energy_sources: vec!["Solar".into(), "Grid Electricity".into()],
            daily_water_liters: DEFAULT_DAILY_WATER_LITERS,
            water_sources: vec![],
            materials: vec!["Linen".into()],
            chemicals: vec!["None".into()],
            waste_management: vec![],
            transportation: vec![],
            certifications: vec![],
            packaging: vec![],
            worker_welfare: vec![],
            technology: vec![],
            community_engagement: vec![],
        }
    }

    #[test]
    fn valid_details_pass() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn blank_location_rejected() {
        let mut input = details();
        input.location = "  ".into();
        assert_matches!(input.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_energy_source_rejected() {
        let mut input = details();
        input.energy_sources.push("Fusion".into());
        assert_matches!(input.validate(), Err(CoreError::Validation(msg)) if msg.contains("Fusion"));
    }

    #[test]
    fn water_above_limit_rejected() {
        let mut input = details();
        input.daily_water_liters = MAX_DAILY_WATER_LITERS + 1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn prompt_embeds_details() {
        let prompt = details().prompt();
        assert!(prompt.contains("Production Location: Porto, Portugal\n"));
        assert!(prompt.contains("Energy Sources: Solar, Grid Electricity\n"));
        assert!(prompt.contains("Daily Water Usage: 10000 liters\n"));
        assert!(prompt.contains("12. Community Engagement:"));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let json = r#"{"location":"Lima, Peru","climate_zone":"Dry (Arid and Semi-arid)",
            "manufacturing_method":"Semi-Automated","production_scale":"Very Large (> 100,000 units/month)"}"#;
        let parsed: ProductionDetails = serde_json::from_str(json).unwrap();
        assert!(parsed.energy_sources.is_empty());
        assert_eq!(parsed.daily_water_liters, DEFAULT_DAILY_WATER_LITERS);
        assert!(parsed.validate().is_ok());
    }
}
