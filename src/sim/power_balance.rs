//! DC bus power balance before grid and battery dispatch.

/// Net DC power after PV serves the load.
///
/// The AC load is converted to its DC equivalent through the inverter
/// efficiency; the inverter loss is charged once, on the DC side.
///
/// # Arguments
///
/// * `pv_kw` - PV DC output (kW, non-negative)
/// * `load_ac_kw` - AC load (kW, non-negative)
/// * `inverter_efficiency` - Inverter efficiency (0..1)
///
/// # Returns
///
/// Signed net power in kW (positive = surplus, negative = deficit)
pub fn net_dc_kw(pv_kw: f64, load_ac_kw: f64, inverter_efficiency: f64) -> f64 {
    pv_kw - dc_equivalent_kw(load_ac_kw, inverter_efficiency)
}

/// DC power needed to deliver `ac_kw` through the inverter.
pub fn dc_equivalent_kw(ac_kw: f64, inverter_efficiency: f64) -> f64 {
    ac_kw / inverter_efficiency
}
