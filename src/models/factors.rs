//! Environment and background factors.
//!
//! Each factor is a closed set of choices, and every choice carries a fixed
//! decimal weight. Modelling them as enums keeps invalid selections (say, an
//! education weight of 1.05) unrepresentable.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UnknownFactor;

/// Common behaviour of the six selectable factors.
pub trait Factor: Copy + PartialEq + 'static {
    /// The factor's name, used in messages and audit output.
    const KIND: &'static str;

    /// Every choice, in the order the form lists them.
    fn all() -> &'static [Self];

    /// The machine-readable key (e.g. `master`).
    fn key(&self) -> &'static str;

    /// The label shown next to the choice in the form.
    fn label(&self) -> &'static str;

    /// The multiplier this choice contributes.
    fn weight(&self) -> Decimal;

    /// Finds the choice with exactly this weight.
    fn from_weight(weight: Decimal) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.weight() == weight)
    }

    /// Parses a choice from its key or from its weight.
    ///
    /// Keys are matched case-insensitively with `-` and `_` treated alike,
    /// so `high-school`, `HIGH_SCHOOL` and `0.9` all select the same choice.
    fn parse(text: &str) -> Result<Self, UnknownFactor> {
        let trimmed = text.trim();
        let normalized = trimmed.to_ascii_lowercase().replace('-', "_");

        if let Some(found) = Self::all().iter().copied().find(|f| f.key() == normalized) {
            return Ok(found);
        }

        Decimal::from_str(trimmed)
            .ok()
            .and_then(Self::from_weight)
            .ok_or_else(|| UnknownFactor {
                kind: Self::KIND,
                value: text.to_string(),
                expected: Self::all()
                    .iter()
                    .map(|f| format!("{} ({:.1})", f.key(), f.weight()))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Highest completed education.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    /// High school or below (0.9).
    HighSchool,
    /// Associate or bachelor's degree (1.0).
    #[default]
    Bachelor,
    /// Master's degree (1.1).
    Master,
    /// Doctorate (1.2).
    Doctorate,
}

impl Factor for Education {
    const KIND: &'static str = "education";

    fn all() -> &'static [Self] {
        &[
            Education::HighSchool,
            Education::Bachelor,
            Education::Master,
            Education::Doctorate,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            Education::HighSchool => "high_school",
            Education::Bachelor => "bachelor",
            Education::Master => "master",
            Education::Doctorate => "doctorate",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Education::HighSchool => "高中及以下",
            Education::Bachelor => "大专/本科",
            Education::Master => "硕士",
            Education::Doctorate => "博士",
        }
    }

    fn weight(&self) -> Decimal {
        match self {
            Education::HighSchool => Decimal::new(9, 1),
            Education::Bachelor => Decimal::new(10, 1),
            Education::Master => Decimal::new(11, 1),
            Education::Doctorate => Decimal::new(12, 1),
        }
    }
}

/// How the physical workplace feels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkEnvironment {
    /// Oppressive (0.8).
    Oppressive,
    /// Normal (1.0).
    #[default]
    Normal,
    /// Comfortable (1.2).
    Comfortable,
}

impl Factor for WorkEnvironment {
    const KIND: &'static str = "work_environment";

    fn all() -> &'static [Self] {
        &[
            WorkEnvironment::Oppressive,
            WorkEnvironment::Normal,
            WorkEnvironment::Comfortable,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            WorkEnvironment::Oppressive => "oppressive",
            WorkEnvironment::Normal => "normal",
            WorkEnvironment::Comfortable => "comfortable",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            WorkEnvironment::Oppressive => "压抑",
            WorkEnvironment::Normal => "正常",
            WorkEnvironment::Comfortable => "舒适",
        }
    }

    fn weight(&self) -> Decimal {
        match self {
            WorkEnvironment::Oppressive => Decimal::new(8, 1),
            WorkEnvironment::Normal => Decimal::new(10, 1),
            WorkEnvironment::Comfortable => Decimal::new(12, 1),
        }
    }
}

/// How many colleagues of the opposite sex are around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OppositeSex {
    /// Almost none (0.9).
    Rare,
    /// A few (1.0).
    #[default]
    Moderate,
    /// Plenty (1.1).
    Plenty,
}

impl Factor for OppositeSex {
    const KIND: &'static str = "opposite_sex";

    fn all() -> &'static [Self] {
        &[OppositeSex::Rare, OppositeSex::Moderate, OppositeSex::Plenty]
    }

    fn key(&self) -> &'static str {
        match self {
            OppositeSex::Rare => "rare",
            OppositeSex::Moderate => "moderate",
            OppositeSex::Plenty => "plenty",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            OppositeSex::Rare => "几乎没有",
            OppositeSex::Moderate => "有一些",
            OppositeSex::Plenty => "挺多的",
        }
    }

    fn weight(&self) -> Decimal {
        match self {
            OppositeSex::Rare => Decimal::new(9, 1),
            OppositeSex::Moderate => Decimal::new(10, 1),
            OppositeSex::Plenty => Decimal::new(11, 1),
        }
    }
}

/// How colleagues get along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colleagues {
    /// Office politics everywhere (0.7).
    Scheming,
    /// Everyone for themselves (1.0).
    #[default]
    Independent,
    /// Harmonious and helpful (1.3).
    Supportive,
}

impl Factor for Colleagues {
    const KIND: &'static str = "colleagues";

    fn all() -> &'static [Self] {
        &[
            Colleagues::Scheming,
            Colleagues::Independent,
            Colleagues::Supportive,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            Colleagues::Scheming => "scheming",
            Colleagues::Independent => "independent",
            Colleagues::Supportive => "supportive",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Colleagues::Scheming => "勾心斗角",
            Colleagues::Independent => "各自为战",
            Colleagues::Supportive => "和谐互助",
        }
    }

    fn weight(&self) -> Decimal {
        match self {
            Colleagues::Scheming => Decimal::new(7, 1),
            Colleagues::Independent => Decimal::new(10, 1),
            Colleagues::Supportive => Decimal::new(13, 1),
        }
    }
}

/// Whether the job asks for a professional qualification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualification {
    /// No requirement (1.0).
    #[default]
    NotRequired,
    /// A qualification is a plus (1.1).
    Advantage,
    /// Hard requirement or scarce skill (1.2).
    Mandatory,
}

impl Factor for Qualification {
    const KIND: &'static str = "qualification";

    fn all() -> &'static [Self] {
        &[
            Qualification::NotRequired,
            Qualification::Advantage,
            Qualification::Mandatory,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            Qualification::NotRequired => "not_required",
            Qualification::Advantage => "advantage",
            Qualification::Mandatory => "mandatory",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Qualification::NotRequired => "无要求/通用",
            Qualification::Advantage => "有加分项",
            Qualification::Mandatory => "硬性要求/稀缺",
        }
    }

    fn weight(&self) -> Decimal {
        match self {
            Qualification::NotRequired => Decimal::new(10, 1),
            Qualification::Advantage => Decimal::new(11, 1),
            Qualification::Mandatory => Decimal::new(12, 1),
        }
    }
}

/// The subjective overall verdict on the job's environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallEnvironment {
    /// 0.7
    Terrible,
    /// 0.8
    Poor,
    /// 0.9
    BelowPar,
    /// 1.0
    #[default]
    Average,
    /// 1.1
    Passable,
    /// 1.2
    Good,
    /// 1.3
    Great,
    /// 1.5
    Excellent,
    /// 2.0
    Heavenly,
}

impl Factor for OverallEnvironment {
    const KIND: &'static str = "overall_environment";

    fn all() -> &'static [Self] {
        &[
            OverallEnvironment::Terrible,
            OverallEnvironment::Poor,
            OverallEnvironment::BelowPar,
            OverallEnvironment::Average,
            OverallEnvironment::Passable,
            OverallEnvironment::Good,
            OverallEnvironment::Great,
            OverallEnvironment::Excellent,
            OverallEnvironment::Heavenly,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            OverallEnvironment::Terrible => "terrible",
            OverallEnvironment::Poor => "poor",
            OverallEnvironment::BelowPar => "below_par",
            OverallEnvironment::Average => "average",
            OverallEnvironment::Passable => "passable",
            OverallEnvironment::Good => "good",
            OverallEnvironment::Great => "great",
            OverallEnvironment::Excellent => "excellent",
            OverallEnvironment::Heavenly => "heavenly",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            OverallEnvironment::Terrible => "贼差",
            OverallEnvironment::Poor => "不太行",
            OverallEnvironment::BelowPar => "有点亏",
            OverallEnvironment::Average => "一般般",
            OverallEnvironment::Passable => "还凑合",
            OverallEnvironment::Good => "还不错",
            OverallEnvironment::Great => "挺好的",
            OverallEnvironment::Excellent => "相当好",
            OverallEnvironment::Heavenly => "神仙级",
        }
    }

    fn weight(&self) -> Decimal {
        match self {
            OverallEnvironment::Terrible => Decimal::new(7, 1),
            OverallEnvironment::Poor => Decimal::new(8, 1),
            OverallEnvironment::BelowPar => Decimal::new(9, 1),
            OverallEnvironment::Average => Decimal::new(10, 1),
            OverallEnvironment::Passable => Decimal::new(11, 1),
            OverallEnvironment::Good => Decimal::new(12, 1),
            OverallEnvironment::Great => Decimal::new(13, 1),
            OverallEnvironment::Excellent => Decimal::new(15, 1),
            OverallEnvironment::Heavenly => Decimal::new(20, 1),
        }
    }
}

macro_rules! impl_factor_text {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = UnknownFactor;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Factor>::parse(s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{} ({:.1})", self.label(), self.weight())
                }
            }
        )*
    };
}

impl_factor_text!(
    Education,
    WorkEnvironment,
    OppositeSex,
    Colleagues,
    Qualification,
    OverallEnvironment,
);

/// All factor selections made on the form, plus the before-8:30 toggle.
///
/// Every field defaults to its neutral choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorSelection {
    /// Education factor.
    pub education: Education,
    /// Workplace environment factor.
    pub work_environment: WorkEnvironment,
    /// Opposite-sex presence factor.
    pub opposite_sex: OppositeSex,
    /// Colleague relations factor.
    pub colleagues: Colleagues,
    /// Qualification requirement factor.
    pub qualification: Qualification,
    /// Overall subjective environment factor.
    pub overall_environment: OverallEnvironment,
    /// Whether work starts before 8:30.
    pub before_830: bool,
}
