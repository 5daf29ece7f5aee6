//! Static template catalog: design styles, document types and industries.
//!
//! The catalog is the cross product `styles × document types × industries`.

use serde::Serialize;
use serde_json::json;

use super::entities::{NewTemplate, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: Plan,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub heading_font: &'static str,
    pub body_font: &'static str,
    pub mood: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocType {
    pub id: &'static str,
    pub name: &'static str,
    pub min_tier: Plan,
}

const fn style(
    id: &'static str,
    name: &'static str,
    tier: Plan,
    colors: [&'static str; 3],
    fonts: [&'static str; 2],
    mood: &'static str,
) -> DesignStyle {
    DesignStyle {
        id,
        name,
        tier,
        primary: colors[0],
        secondary: colors[1],
        accent: colors[2],
        heading_font: fonts[0],
        body_font: fonts[1],
        mood,
    }
}

#[rustfmt::skip]
pub const STYLES: [DesignStyle; 20] = [
    style("executive-gold", "Executive Gold", Plan::Free, ["#C99532", "#1B3A5C", "#E8D5A3"], ["Playfair Display", "DM Sans"], "Prestigious and authoritative"),
    style("minimal-clean", "Minimal Clean", Plan::Free, ["#2D2D2D", "#FAFAFA", "#E0E0E0"], ["Inter", "Inter"], "Clean and modern"),
    style("corporate-bold", "Corporate Bold", Plan::Free, ["#1A237E", "#FFFFFF", "#FF6F00"], ["Montserrat", "Open Sans"], "Professional and confident"),
    style("classic-traditional", "Classic Traditional", Plan::Free, ["#1B1B1B", "#F5F0E8", "#8B0000"], ["Merriweather", "Source Serif Pro"], "Timeless and trustworthy"),
    style("geometric-art", "Geometric Art", Plan::Free, ["#6200EA", "#FFFFFF", "#00BFA5"], ["Poppins", "Roboto"], "Creative and structured"),
    style("watercolor", "Watercolor", Plan::Free, ["#5C6BC0", "#FFF8E1", "#E91E63"], ["Dancing Script", "Lora"], "Artistic and warm"),
    style("dark-professional", "Dark Professional", Plan::Free, ["#90CAF9", "#121212", "#FFC107"], ["Raleway", "Nunito"], "Sleek and premium"),
    style("magazine", "Magazine", Plan::Free, ["#D50000", "#FFFFFF", "#212121"], ["Oswald", "Lato"], "Bold editorial style"),
    style("modern-stripe", "Modern Stripe", Plan::Pro, ["#635BFF", "#F6F9FC", "#00D4AA"], ["Inter", "Inter"], "Tech-forward and clean"),
    style("creative-studio", "Creative Studio", Plan::Pro, ["#FF4081", "#FAFAFA", "#7C4DFF"], ["Abril Fatface", "Work Sans"], "Vibrant and expressive"),
    style("fresh-green", "Fresh Green", Plan::Pro, ["#2E7D32", "#F1F8E9", "#FFC107"], ["Quicksand", "Nunito Sans"], "Natural and eco-friendly"),
    style("warm-terracotta", "Warm Terracotta", Plan::Pro, ["#BF360C", "#FFF3E0", "#5D4037"], ["Playfair Display", "Karla"], "Warm and artisan"),
    style("tech-startup", "Tech Startup", Plan::Pro, ["#00B8D4", "#ECEFF1", "#651FFF"], ["Space Grotesk", "IBM Plex Sans"], "Innovative and fresh"),
    style("retro-vintage", "Retro Vintage", Plan::Pro, ["#4E342E", "#EFEBE9", "#FF8F00"], ["Bitter", "Josefin Sans"], "Nostalgic craftsmanship"),
    style("royal-crest", "Royal Crest", Plan::Pro, ["#1A237E", "#E8EAF6", "#FFD700"], ["Cormorant Garamond", "Nunito"], "Regal and prestigious"),
    style("luxury-black", "Luxury Black", Plan::Business, ["#FFD700", "#0A0A0A", "#B0B0B0"], ["Didot", "Helvetica Neue"], "Ultra-premium and exclusive"),
    style("neon-gradient", "Neon Gradient", Plan::Business, ["#FF6EC7", "#0F0C29", "#00F5FF"], ["Exo 2", "Rubik"], "Futuristic and bold"),
    style("blueprint", "Blueprint", Plan::Business, ["#FFFFFF", "#1565C0", "#90CAF9"], ["Roboto Mono", "Roboto"], "Technical and precise"),
    style("swiss-design", "Swiss Design", Plan::Business, ["#D50000", "#FFFFFF", "#212121"], ["Helvetica Neue", "Helvetica Neue"], "Grid-perfect minimalism"),
    style("japanese-zen", "Japanese Zen", Plan::Business, ["#2D2D2D", "#FAF8F5", "#C62828"], ["Noto Serif JP", "Noto Sans JP"], "Serene and balanced"),
];

#[rustfmt::skip]
pub const DOC_TYPES: [DocType; 12] = [
    DocType { id: "invoice", name: "Invoice", min_tier: Plan::Free },
    DocType { id: "estimate", name: "Estimate", min_tier: Plan::Free },
    DocType { id: "receipt", name: "Receipt", min_tier: Plan::Free },
    DocType { id: "letter", name: "Letter", min_tier: Plan::Free },
    DocType { id: "resume", name: "Resume", min_tier: Plan::Free },
    DocType { id: "form", name: "Form", min_tier: Plan::Free },
    DocType { id: "report", name: "Report", min_tier: Plan::Free },
    DocType { id: "contract", name: "Contract", min_tier: Plan::Pro },
    DocType { id: "nda", name: "NDA", min_tier: Plan::Pro },
    DocType { id: "proposal", name: "Proposal", min_tier: Plan::Pro },
    DocType { id: "purchase_order", name: "Purchase Order", min_tier: Plan::Pro },
    DocType { id: "pay_stub", name: "Pay Stub", min_tier: Plan::Business },
];

#[rustfmt::skip]
pub const INDUSTRIES: [&str; 44] = [
    "general", "blank", "consulting", "accounting", "legal", "marketing-agency",
    "architecture", "engineering", "financial-advisory", "insurance",
    "medical-practice", "dental", "pharmacy", "mental-health", "veterinary", "home-health",
    "software", "saas", "it-services", "cybersecurity", "web-development",
    "construction", "plumbing", "electrical", "hvac", "landscaping", "cleaning", "auto-repair", "handyman",
    "photography", "graphic-design", "video-production", "interior-design", "event-planning",
    "restaurant", "retail", "ecommerce", "catering",
    "real-estate", "property-management",
    "education", "nonprofit", "church", "fitness",
];

/// Regulated industries whose legal and payroll documents are business-only.
#[rustfmt::skip]
pub const BUSINESS_ONLY_INDUSTRIES: [&str; 9] = [
    "medical-practice", "dental", "pharmacy", "mental-health", "veterinary", "home-health",
    "financial-advisory", "insurance", "cybersecurity",
];

const BUSINESS_ONLY_DOC_TYPES: [&str; 3] = ["contract", "nda", "pay_stub"];

/// Access tier of a (style, document type, industry) combination.
pub fn tier_for(style: &DesignStyle, doc_type: &DocType, industry: &str) -> Plan {
    if doc_type.id == "pay_stub" {
        return Plan::Business;
    }
    if BUSINESS_ONLY_INDUSTRIES.contains(&industry) && BUSINESS_ONLY_DOC_TYPES.contains(&doc_type.id)
    {
        return Plan::Business;
    }
    style.tier.max(doc_type.min_tier)
}

/// Lower-cases and joins alphanumeric runs with single hyphens.
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// `"it-services"` → `"It Services"`.
pub fn title_case(input: &str) -> String {
    input
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display name of a catalog row. The `blank` industry has no prefix.
pub fn template_name(style: &DesignStyle, doc_type: &DocType, industry: &str) -> String {
    if industry == "blank" {
        format!("{} - {}", doc_type.name, style.name)
    } else {
        format!("{} {} - {}", title_case(industry), doc_type.name, style.name)
    }
}

/// Sizes of the catalog dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogBreakdown {
    pub styles: usize,
    pub doc_types: usize,
    pub industries: usize,
    pub expected: usize,
}

pub fn breakdown() -> CatalogBreakdown {
    CatalogBreakdown {
        styles: STYLES.len(),
        doc_types: DOC_TYPES.len(),
        industries: INDUSTRIES.len(),
        expected: STYLES.len() * DOC_TYPES.len() * INDUSTRIES.len(),
    }
}

/// Builds every catalog row in style, document type, industry order.
pub fn generate() -> Vec<NewTemplate> {
    let mut templates = Vec::with_capacity(breakdown().expected);
    let mut sort_order = 0;

    for style in &STYLES {
        for doc_type in &DOC_TYPES {
            for industry in INDUSTRIES {
                templates.push(NewTemplate {
                    name: template_name(style, doc_type, industry),
                    slug: slugify(&format!("{}-{}-{}", doc_type.id, style.id, industry)),
                    category: doc_type.id.to_string(),
                    tier: tier_for(style, doc_type, industry),
                    style_id: style.id.to_string(),
                    style_name: style.name.to_string(),
                    industry: industry.to_string(),
                    document_type: doc_type.id.to_string(),
                    primary_color: style.primary.to_string(),
                    secondary_color: style.secondary.to_string(),
                    accent_color: style.accent.to_string(),
                    heading_font: style.heading_font.to_string(),
                    body_font: style.body_font.to_string(),
                    mood: style.mood.to_string(),
                    is_active: true,
                    sort_order,
                    fields: json!({ "sections": [] }),
                });
                sort_order += 1;
            }
        }
    }

    templates
}
