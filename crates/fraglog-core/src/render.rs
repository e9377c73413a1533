//! Human-readable frag rendering.
//!
//! Rendering is deliberately lossy: weapon codes collapse into category
//! glyphs. The delimited export is the lossless surface; it never goes
//! through this module.

use thiserror::Error;

use crate::frag::{FragEvent, FragKind};

/// Substituted by [`render_frag_lossy`] when a weapon code has no glyph.
pub const UNKNOWN_WEAPON_GLYPH: &str = "❓";

const KILLER_GLYPH: &str = "😛";
const VICTIM_GLYPH: &str = "😦";
const SUICIDE_GLYPH: &str = "☠";

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// A weapon code outside the engine's known set.
///
/// A rendering-time concern only: the underlying [`FragEvent`] stays valid
/// and exportable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no glyph for weapon code {code:?}")]
    UnknownWeapon { code: String },
}

/// Category glyph for an engine weapon code.
pub fn weapon_glyph(code: &str) -> Result<&'static str, RenderError> {
    let glyph = match code {
        "Vehicle" => "🚙",
        "Boat" => "🚤",
        "Falcon" | "Shotgun" | "P90" | "MP5" | "M4" | "AG36" | "OICW" | "SniperRifle"
        | "M249" | "MG" | "VehicleMountedAutoMG" | "VehicleMountedMG" => "🔫",
        "AG36Grenade" | "OICWGrenade" | "StickyExplosive" | "HandGrenade" => "💣",
        "Rocket" | "VehicleMountedRocketMG" | "VehicleRocket" => "🚀",
        "Machete" => "🔪",
        _ => {
            return Err(RenderError::UnknownWeapon {
                code: code.to_owned(),
            });
        }
    };
    Ok(glyph)
}

/// Render one frag as an annotated display line.
///
/// Fails on unknown weapon codes; callers that prefer degrading over
/// failing use [`render_frag_lossy`].
pub fn render_frag(frag: &FragEvent) -> Result<String, RenderError> {
    match &frag.kind {
        FragKind::Suicide => Ok(suicide_line(frag)),
        FragKind::Kill { victim, weapon } => {
            Ok(kill_line(frag, victim, weapon_glyph(weapon)?))
        }
    }
}

/// Like [`render_frag`], with [`UNKNOWN_WEAPON_GLYPH`] standing in for
/// unknown weapon codes.
#[must_use]
pub fn render_frag_lossy(frag: &FragEvent) -> String {
    match &frag.kind {
        FragKind::Suicide => suicide_line(frag),
        FragKind::Kill { victim, weapon } => {
            kill_line(frag, victim, weapon_glyph(weapon).unwrap_or(UNKNOWN_WEAPON_GLYPH))
        }
    }
}

fn suicide_line(frag: &FragEvent) -> String {
    format!(
        "[{}] {VICTIM_GLYPH} {} {SUICIDE_GLYPH}",
        frag.timestamp.format(STAMP_FORMAT),
        frag.killer
    )
}

fn kill_line(frag: &FragEvent, victim: &str, glyph: &str) -> String {
    format!(
        "[{}] {KILLER_GLYPH} {} {glyph} {VICTIM_GLYPH} {victim}",
        frag.timestamp.format(STAMP_FORMAT),
        frag.killer
    )
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone};

    use super::*;

    fn stamp() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(-5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2006, 6, 12, 14, 36, 26)
            .unwrap()
    }

    fn kill(weapon: &str) -> FragEvent {
        FragEvent {
            timestamp: stamp(),
            killer: "papazark".to_owned(),
            kind: FragKind::Kill {
                victim: "lamonthe".to_owned(),
                weapon: weapon.to_owned(),
            },
        }
    }

    #[test]
    fn kill_template_carries_both_players() {
        let line = render_frag(&kill("AG36")).unwrap();
        assert_eq!(line, "[2006-06-12 14:36:26 -05:00] 😛 papazark 🔫 😦 lamonthe");
    }

    #[test]
    fn suicide_template_has_no_victim_slot() {
        let frag = FragEvent {
            timestamp: stamp(),
            killer: "cyap".to_owned(),
            kind: FragKind::Suicide,
        };
        assert_eq!(
            render_frag(&frag).unwrap(),
            "[2006-06-12 14:36:26 -05:00] 😦 cyap ☠"
        );
    }

    #[test]
    fn every_weapon_category_has_its_glyph() {
        for (weapon, glyph) in [
            ("Vehicle", "🚙"),
            ("Boat", "🚤"),
            ("SniperRifle", "🔫"),
            ("HandGrenade", "💣"),
            ("VehicleRocket", "🚀"),
            ("Machete", "🔪"),
        ] {
            assert_eq!(weapon_glyph(weapon).unwrap(), glyph, "for {weapon}");
        }
    }

    #[test]
    fn unknown_weapon_is_an_error_not_a_panic() {
        assert_eq!(
            weapon_glyph("BlueLaser"),
            Err(RenderError::UnknownWeapon {
                code: "BlueLaser".to_owned()
            })
        );
        assert!(render_frag(&kill("BlueLaser")).is_err());
    }

    #[test]
    fn lossy_rendering_substitutes_the_fallback_glyph() {
        let line = render_frag_lossy(&kill("BlueLaser"));
        assert_eq!(line, "[2006-06-12 14:36:26 -05:00] 😛 papazark ❓ 😦 lamonthe");
    }
}
