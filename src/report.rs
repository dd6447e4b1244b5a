//! Telegram report rendering (legacy Markdown).

use chrono::NaiveDate;

use crate::signal::{Classification, MAYER_DEEP_VALUE, MAYER_TOP_RISK, VIX_PANIC};
use crate::types::MarketSnapshot;

/// DXY above this weighs on BTC.
pub const DXY_HEADWIND: f64 = 105.0;
/// DXY below this is supportive.
pub const DXY_TAILWIND: f64 = 100.0;
/// VIX below this reads as complacency.
pub const VIX_GREED: f64 = 15.0;

const RULE: &str = "-------------------------------";
const FOOTER: &str = "_Powered by GitHub Actions_";

/// Render the daily message. Pure: the same inputs always give the same bytes.
pub fn render(classification: &Classification, snapshot: &MarketSnapshot, date: NaiveDate) -> String {
    let lines = [
        "📊 *Macro Sniper Daily Report*".to_string(),
        format!("📅 {}", date.format("%Y-%m-%d")),
        RULE.to_string(),
        format!("{} *{}*", classification.signal.emoji(), classification.label),
        format!("💡 Action: {}", classification.action),
        RULE.to_string(),
        "*1. Liquidity & Macro (Fuel)*".to_string(),
        format!("• US Dollar Index (DXY): `{:.2}`", snapshot.dxy),
        format!("  _(>{DXY_HEADWIND:.0} pressures BTC / <{DXY_TAILWIND:.0} tailwind)_"),
        format!("• VIX: `{:.2}`", snapshot.vix),
        format!("  _(>{VIX_PANIC:.0} panic / <{VIX_GREED:.0} greed)_"),
        String::new(),
        "*2. Bitcoin Valuation (Value)*".to_string(),
        format!("• Price: `${}`", thousands(snapshot.btc)),
        format!("• Mayer Multiple: `{:.2}`", snapshot.mayer),
        format!("  _(<{MAYER_DEEP_VALUE} accumulation zone / >{MAYER_TOP_RISK} distribution zone)_"),
        String::new(),
        "*3. Market Sentiment*".to_string(),
        format!(
            "• Fear & Greed Index: `{}` ({})",
            snapshot.fear_greed.value, snapshot.fear_greed.classification
        ),
        format!("• Funding Rate: `{:.4}%`", snapshot.funding_rate_pct),
        RULE.to_string(),
        FOOTER.to_string(),
    ];
    lines.join("\n")
}

/// Round to an integer and group digits by thousands: `64123.7` -> `64,124`.
pub fn thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    // `-0` after rounding a tiny negative.
    if out == "0" {
        return out;
    }
    format!("{sign}{out}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{classify, Signal};
    use crate::types::FearGreed;
    use pretty_assertions::assert_eq;

    fn sample() -> MarketSnapshot {
        MarketSnapshot {
            vix: 18.456,
            vvix: 92.1,
            btc: 64_123.7,
            dxy: 104.254,
            mayer: 1.2345,
            funding_rate_pct: 0.01,
            fear_greed: FearGreed {
                value: 23,
                classification: "Extreme Fear".into(),
            },
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()
    }

    #[test]
    fn renders_full_template() {
        let snap = sample();
        let msg = render(&classify(&snap), &snap, date());
        let expected = "\
📊 *Macro Sniper Daily Report*
📅 2024-06-11
-------------------------------
⚖️ *Range-bound / Wait*
💡 Action: grid trading or hold
-------------------------------
*1. Liquidity & Macro (Fuel)*
• US Dollar Index (DXY): `104.25`
  _(>105 pressures BTC / <100 tailwind)_
• VIX: `18.46`
  _(>30 panic / <15 greed)_

*2. Bitcoin Valuation (Value)*
• Price: `$64,124`
• Mayer Multiple: `1.23`
  _(<0.8 accumulation zone / >2.4 distribution zone)_

*3. Market Sentiment*
• Fear & Greed Index: `23` (Extreme Fear)
• Funding Rate: `0.0100%`
-------------------------------
_Powered by GitHub Actions_";
        assert_eq!(msg, expected);
    }

    #[test]
    fn signal_line_carries_emoji_and_label() {
        let mut snap = sample();
        snap.mayer = 0.5;
        snap.vix = 35.0;
        let c = classify(&snap);
        assert_eq!(c.signal, Signal::DiamondBuy);
        let msg = render(&c, &snap, date());
        assert!(msg.contains("🚀 *Diamond Buy*"));
        assert!(msg.contains("💡 Action: aggressive staged accumulation"));
    }

    #[test]
    fn negative_funding_keeps_four_decimals() {
        let mut snap = sample();
        snap.funding_rate_pct = -0.0125;
        let msg = render(&classify(&snap), &snap, date());
        assert!(msg.contains("• Funding Rate: `-0.0125%`"), "{msg}");
    }

    #[test]
    fn render_is_byte_stable() {
        let snap = sample();
        let c = classify(&snap);
        assert_eq!(render(&c, &snap, date()), render(&c, &snap, date()));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(1_000.0), "1,000");
        assert_eq!(thousands(64_123.7), "64,124");
        assert_eq!(thousands(1_234_567.0), "1,234,567");
        assert_eq!(thousands(-98_765.0), "-98,765");
        assert_eq!(thousands(-0.2), "0");
    }
}
