//! Score tiers.
//!
//! Eight half-open bands cover every real score with no gaps and no overlaps:
//! `< 10`, `[10, 30)`, `[30, 50)`, `[50, 70)`, `[70, 90)`, `[90, 120)`,
//! `[120, 150)` and `>= 150`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A labelled verdict band for a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Below 10.
    Hell,
    /// 10 up to 30.
    Warning,
    /// 30 up to 50.
    Endure,
    /// 50 up to 70.
    Passing,
    /// 70 up to 90.
    Decent,
    /// 90 up to 120.
    Profitable,
    /// 120 up to 150.
    Winner,
    /// 150 and above.
    Chosen,
}

impl Tier {
    /// Every tier, lowest band first.
    pub const ALL: [Tier; 8] = [
        Tier::Hell,
        Tier::Warning,
        Tier::Endure,
        Tier::Passing,
        Tier::Decent,
        Tier::Profitable,
        Tier::Winner,
        Tier::Chosen,
    ];

    /// Inclusive lower bound, or `None` for the lowest tier.
    pub fn lower_bound(&self) -> Option<Decimal> {
        match self {
            Tier::Hell => None,
            Tier::Warning => Some(Decimal::from(10)),
            Tier::Endure => Some(Decimal::from(30)),
            Tier::Passing => Some(Decimal::from(50)),
            Tier::Decent => Some(Decimal::from(70)),
            Tier::Profitable => Some(Decimal::from(90)),
            Tier::Winner => Some(Decimal::from(120)),
            Tier::Chosen => Some(Decimal::from(150)),
        }
    }

    /// Exclusive upper bound, or `None` for the highest tier.
    pub fn upper_bound(&self) -> Option<Decimal> {
        Tier::ALL
            .iter()
            .skip_while(|t| *t != self)
            .nth(1)
            .and_then(|next| next.lower_bound())
    }

    /// Returns true if `score` falls inside this band.
    pub fn contains(&self, score: Decimal) -> bool {
        let above_lower = self.lower_bound().is_none_or(|lower| score >= lower);
        let below_upper = self.upper_bound().is_none_or(|upper| score < upper);
        above_lower && below_upper
    }

    /// The one-character badge pinned next to the score.
    pub fn badge(&self) -> &'static str {
        match self {
            Tier::Hell => "🆘",
            Tier::Warning => "危",
            Tier::Endure => "忍",
            Tier::Passing => "平",
            Tier::Decent => "可",
            Tier::Profitable => "赚",
            Tier::Winner => "神",
            Tier::Chosen => "仙",
        }
    }

    /// The verdict headline.
    pub fn title(&self) -> &'static str {
        match self {
            Tier::Hell => "地狱模式 🆘",
            Tier::Warning => "劝退警告 📉",
            Tier::Endure => "忍辱负重 😩",
            Tier::Passing => "勉强及格 🤷",
            Tier::Decent => "还算不错 👍",
            Tier::Profitable => "小赚一笔 😏",
            Tier::Winner => "人生赢家 😎",
            Tier::Chosen => "天选打工人 🙏",
        }
    }

    /// The descriptive verdict.
    pub fn message(&self) -> &'static str {
        match self {
            Tier::Hell => "这性价比...是在做慈善吗？老板PUA大师？赶紧跑路，别回头！",
            Tier::Warning => "付出与回报严重失衡！建议把简历挂出去看看机会，别耽误青春。",
            Tier::Endure => "食之无味，弃之可惜。为了生活，先忍着吧，记得按时下班。",
            Tier::Passing => "不好不坏，比上不足比下有余。适合佛系躺平，偶尔摸鱼。",
            Tier::Decent => "工作有点小盼头，性价比在线！继续努力，争取早日加薪！",
            Tier::Profitable => "可以啊！这班上得挺值当！工作舒心，钱包也还行，偷着乐吧！",
            Tier::Winner => "相当哇塞！别人是上班，你这是享受生活吧？求内推！",
            Tier::Chosen => "这是什么神仙工作？！请问贵司还缺人吗？我自带键盘！",
        }
    }

    /// RGB accent colour used when the result card is rendered.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Tier::Hell => [0xb9, 0x1c, 0x1c],
            Tier::Warning => [0xdc, 0x26, 0x26],
            Tier::Endure => [0xea, 0x58, 0x0c],
            Tier::Passing => [0xca, 0x8a, 0x04],
            Tier::Decent => [0x65, 0xa3, 0x0d],
            Tier::Profitable => [0x16, 0xa3, 0x4a],
            Tier::Winner => [0x10, 0xb9, 0x81],
            Tier::Chosen => [0x06, 0xb6, 0xd4],
        }
    }

    /// A human-readable description of the band, e.g. `[30, 50)`.
    pub fn range_label(&self) -> String {
        match (self.lower_bound(), self.upper_bound()) {
            (None, Some(upper)) => format!("< {}", upper),
            (Some(lower), Some(upper)) => format!("[{}, {})", lower, upper),
            (Some(lower), None) => format!(">= {}", lower),
            (None, None) => "any".to_string(),
        }
    }
}
