//! Scaling of raw ingredient quantities to batch/boil volumes.
//!
//! Recipes come in wildly different sizes; scaled quantities put every
//! addition on a per-litre basis so recipes are comparable. Missing inputs or
//! zero volumes yield `None` rather than an error.

/// Hop form written in recipe files for whole-cone hops.
const LEAF_FORM: &str = "leaf";

/// Utilization penalty for whole-cone hops relative to pellets.
const LEAF_FACTOR: f64 = 0.1;

/// Extract contribution of a fermentable, kg extract per litre of boil.
///
/// `amount * yield * efficiency / boil_size`.
pub fn scale_ferm(
    amount_kg: Option<f64>,
    yield_fraction: Option<f64>,
    efficiency: Option<f64>,
    boil_size_l: Option<f64>,
) -> Option<f64> {
    let boil = nonzero(boil_size_l?)?;
    Some(amount_kg? * yield_fraction? * efficiency? / boil)
}

/// Alpha-acid mass of a boil hop addition, kg per litre of boil.
///
/// `amount * alpha * (1 - 0.1 * leaf) / boil_size`; whole-cone hops utilize
/// about 10% worse than pellets.
pub fn scale_hop_boil(
    amount_kg: Option<f64>,
    alpha_fraction: Option<f64>,
    form: Option<&str>,
    boil_size_l: Option<f64>,
) -> Option<f64> {
    let boil = nonzero(boil_size_l?)?;
    let leaf = form.is_some_and(|f| f == LEAF_FORM);
    let penalty = if leaf { 1.0 - LEAF_FACTOR } else { 1.0 };
    Some(amount_kg? * alpha_fraction? * penalty / boil)
}

/// Dry-hop addition, kg per litre of batch.
pub fn scale_hop_dry(amount_kg: Option<f64>, batch_size_l: Option<f64>) -> Option<f64> {
    let batch = nonzero(batch_size_l?)?;
    Some(amount_kg? / batch)
}

/// Scale a hop addition by its timing: additions with boil time > 0 are boil
/// hops, the rest are dry hops.
pub fn scale_hop(
    amount_kg: Option<f64>,
    alpha_fraction: Option<f64>,
    form: Option<&str>,
    time_min: Option<f64>,
    boil_size_l: Option<f64>,
    batch_size_l: Option<f64>,
) -> Option<f64> {
    if time_min? > 0.0 {
        scale_hop_boil(amount_kg, alpha_fraction, form, boil_size_l)
    } else {
        scale_hop_dry(amount_kg, batch_size_l)
    }
}

/// Misc addition, amount per litre of batch.
pub fn scale_misc(amount: Option<f64>, batch_size_l: Option<f64>) -> Option<f64> {
    let batch = nonzero(batch_size_l?)?;
    Some(amount? / batch)
}

fn nonzero(value: f64) -> Option<f64> {
    if value == 0.0 {
        None
    } else {
        Some(value)
    }
}
