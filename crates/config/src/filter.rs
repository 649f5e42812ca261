use serde::{Deserialize, Serialize};

/// Binarization filter turning the gray image into black and white.
///
/// Persisted as a single child element, `<global-filter>` or
/// `<adaptive-filter>`, with the filter parameters as attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilterRepr", into = "FilterRepr")]
pub enum FilterDescriptor {
    /// One threshold for the whole image.
    Global(GlobalFilter),
    /// Threshold derived from mean and standard deviation around each
    /// pixel.
    Adaptive(AdaptiveFilter),
}

impl Default for FilterDescriptor {
    fn default() -> Self {
        Self::Adaptive(AdaptiveFilter::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalFilter {
    #[serde(rename = "@threshold")]
    pub threshold: u8,
}

impl Default for GlobalFilter {
    fn default() -> Self {
        Self { threshold: 140 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveFilter {
    #[serde(rename = "@mean-coef")]
    pub mean_coef: f64,
    #[serde(rename = "@std-dev-coef")]
    pub std_dev_coef: f64,
}

impl Default for AdaptiveFilter {
    fn default() -> Self {
        Self {
            mean_coef: 0.7,
            std_dev_coef: 0.9,
        }
    }
}

/// Wire shape: exactly one of the two child elements must be present.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
struct FilterRepr {
    #[serde(rename = "global-filter", default, skip_serializing_if = "Option::is_none")]
    global: Option<GlobalFilter>,
    #[serde(rename = "adaptive-filter", default, skip_serializing_if = "Option::is_none")]
    adaptive: Option<AdaptiveFilter>,
}

impl TryFrom<FilterRepr> for FilterDescriptor {
    type Error = String;

    fn try_from(repr: FilterRepr) -> Result<Self, Self::Error> {
        match (repr.global, repr.adaptive) {
            (Some(global), None) => Ok(Self::Global(global)),
            (None, Some(adaptive)) => Ok(Self::Adaptive(adaptive)),
            (None, None) => Err("binarization element holds no filter".into()),
            (Some(_), Some(_)) => Err("binarization element holds two filters".into()),
        }
    }
}

impl From<FilterDescriptor> for FilterRepr {
    fn from(descriptor: FilterDescriptor) -> Self {
        match descriptor {
            FilterDescriptor::Global(global) => Self {
                global: Some(global),
                adaptive: None,
            },
            FilterDescriptor::Adaptive(adaptive) => Self {
                global: None,
                adaptive: Some(adaptive),
            },
        }
    }
}
