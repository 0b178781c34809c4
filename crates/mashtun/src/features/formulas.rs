//! Brewing-chemistry formulas over scaled quantities.
//!
//! All of these are documented closed-form estimates: gravity from extract,
//! bitterness per Tinseth, color per Morey, alcohol from the gravity drop.

/// Gravity points contributed by one kg of extract per litre (sucrose basis:
/// 46 points per pound per gallon).
const POINTS_PER_KG_PER_L: f64 = 384.0;

/// Pounds-per-gallon per kg-per-litre, for the imperial Morey inputs.
const LB_GAL_PER_KG_L: f64 = 8.3454;

/// ABV per unit of gravity drop.
const ABV_FACTOR: f64 = 131.25;

/// A boil hop addition reduced to what Tinseth needs.
#[derive(Debug, Clone, Copy)]
pub struct HopAddition {
    /// Alpha-acid mass, kg per litre of boil (see `scale_hop_boil`).
    pub scaled_alpha: f64,
    /// Boil time in minutes; zero or negative means no isomerization.
    pub time_min: f64,
}

/// A fermentable reduced to what Morey needs.
#[derive(Debug, Clone, Copy)]
pub struct GrainColor {
    /// Grain mass, kg per litre of batch.
    pub amount_per_l: f64,
    /// Grain color in SRM-equivalent degrees lovibond.
    pub color: f64,
}

/// Original gravity from total fermentable extract (kg per litre of wort).
pub fn original_gravity(total_extract: f64) -> f64 {
    1.0 + total_extract * POINTS_PER_KG_PER_L / 1000.0
}

/// Final gravity given apparent yeast attenuation (fraction, 0–1).
pub fn final_gravity(og: f64, attenuation: f64) -> f64 {
    og - (og - 1.0) * attenuation
}

/// Alcohol by volume (percent) from the gravity drop.
pub fn abv(og: f64, fg: f64) -> f64 {
    (og - fg) * ABV_FACTOR
}

/// Tinseth IBU estimate.
///
/// Utilization is the product of a wort-gravity "bigness" factor and a
/// boil-time factor; each addition contributes utilization times its
/// alpha-acid concentration in mg/L.
pub fn tinseth_ibu(additions: &[HopAddition], og: f64) -> f64 {
    let bigness = 1.65 * 0.000125_f64.powf(og - 1.0);
    additions
        .iter()
        .filter(|a| a.time_min > 0.0)
        .map(|a| {
            let time_factor = (1.0 - (-0.04 * a.time_min).exp()) / 4.15;
            let mg_per_l = a.scaled_alpha * 1.0e6;
            bigness * time_factor * mg_per_l
        })
        .sum()
}

/// Malt color units over the grain bill (imperial basis).
pub fn color_units(grains: &[GrainColor]) -> f64 {
    grains
        .iter()
        .map(|g| g.amount_per_l * LB_GAL_PER_KG_L * g.color)
        .sum()
}

/// Morey SRM estimate from malt color units.
pub fn morey_srm(mcu: f64) -> f64 {
    1.4922 * mcu.powf(0.6859)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_gravity() {
        // ~0.105 kg extract per litre is a normal-strength wort
        let og = original_gravity(0.105);
        assert!((og - 1.0403).abs() < 0.001);
        assert_eq!(original_gravity(0.0), 1.0);
    }

    #[test]
    fn test_final_gravity_and_abv() {
        let og = 1.050;
        let fg = final_gravity(og, 0.75);
        assert!((fg - 1.0125).abs() < 1e-9);
        let alcohol = abv(og, fg);
        assert!((alcohol - 4.92).abs() < 0.01);
    }

    #[test]
    fn test_tinseth_60_minute_addition() {
        // 28 g of 6% AA hops in 20 L at 60 min, 1.050 wort:
        // utilization ≈ 0.231, concentration ≈ 84 mg/L → ≈ 19 IBU
        let additions = [HopAddition {
            scaled_alpha: 0.028 * 0.06 / 20.0,
            time_min: 60.0,
        }];
        let ibu = tinseth_ibu(&additions, 1.050);
        assert!((ibu - 19.4).abs() < 1.0, "got {ibu}");
    }

    #[test]
    fn test_tinseth_ignores_dry_hops() {
        let additions = [HopAddition {
            scaled_alpha: 0.001,
            time_min: 0.0,
        }];
        assert_eq!(tinseth_ibu(&additions, 1.050), 0.0);
    }

    #[test]
    fn test_morey_pale_beer() {
        // 4 kg of 2 L pale malt in 19 L → MCU ≈ 3.5 → SRM ≈ 3.5
        let grains = [GrainColor {
            amount_per_l: 4.0 / 19.0,
            color: 2.0,
        }];
        let srm = morey_srm(color_units(&grains));
        assert!((srm - 3.5).abs() < 0.5, "got {srm}");
    }

    #[test]
    fn test_morey_zero_grain() {
        assert_eq!(morey_srm(color_units(&[])), 0.0);
    }
}
