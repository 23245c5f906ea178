//! Built-in category profiles
//!
//! A profile is the closed set of content categories the model may choose
//! from, plus a short scoring hint. Diversity selection works over whatever
//! tags the active profile supplies.

use super::ProfileConfig;

pub struct BuiltinProfile {
    pub name: &'static str,
    pub categories: &'static [&'static str],
    pub guidance: &'static str,
}

pub const BUILTIN_PROFILES: &[BuiltinProfile] = &[
    BuiltinProfile {
        name: "general",
        categories: &[
            "exterior",
            "interior",
            "landscape",
            "scenic_view",
            "trail",
            "signage",
            "detail",
            "food",
            "people",
            "other",
        ],
        guidance: "Be strict: food close-ups, selfies, and generic shots score low. \
            Exteriors, scenic views, interiors showing ambiance, and landscape shots score high.",
    },
    BuiltinProfile {
        name: "restaurant",
        categories: &[
            "exterior",
            "dining_room",
            "bar",
            "patio",
            "food",
            "drinks",
            "signage",
            "detail",
            "people",
            "other",
        ],
        guidance: "Favor photos that convey the space: the storefront, the dining room, the patio. \
            A well-lit signature dish is welcome, but menus, receipts and blurry plates score low.",
    },
    BuiltinProfile {
        name: "trail",
        categories: &[
            "trailhead",
            "trail",
            "scenic_view",
            "landscape",
            "water",
            "wildlife",
            "signage",
            "facilities",
            "people",
            "other",
        ],
        guidance: "Favor wide views of the trail and the scenery it reaches. \
            Parking lots, maps photographed at an angle and group selfies score low.",
    },
    BuiltinProfile {
        name: "architecture",
        categories: &[
            "facade",
            "exterior",
            "interior",
            "detail",
            "aerial",
            "streetscape",
            "signage",
            "people",
            "other",
        ],
        guidance: "Favor straight, well-composed views of the building and its defining details. \
            Heavily cropped, tilted or crowd-dominated shots score low.",
    },
];

pub fn builtin(name: &str) -> Option<&'static BuiltinProfile> {
    BUILTIN_PROFILES.iter().find(|p| p.name == name)
}

impl From<&BuiltinProfile> for ProfileConfig {
    fn from(profile: &BuiltinProfile) -> Self {
        Self {
            categories: profile.categories.iter().map(|c| c.to_string()).collect(),
            guidance: profile.guidance.to_string(),
            prompt_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_include_other() {
        for profile in BUILTIN_PROFILES {
            assert!(
                profile.categories.contains(&"other"),
                "{} lacks the fallback category",
                profile.name
            );
        }
    }

    #[test]
    fn test_builtin_lookup() {
        assert!(builtin("trail").is_some());
        assert!(builtin("museum").is_none());
    }
}
