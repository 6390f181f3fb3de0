//! # 混合焓估算
//!
//! Scatchard–Hildebrand 正规溶液模型，298.15 K：
//!
//! ```text
//! Vm    = MW / (1000 ρ)                       [m³/mol]
//! δ     = sqrt((ΔHvap - R T) / Vm)            [Pa^0.5]
//! φ_i   = x_i Vm_i / Σ x_j Vm_j
//! ΔHmix = (x1 Vm1 + x2 Vm2) φ1 φ2 (δ1 - δ2)²  [J/mol]
//! ```
//!
//! ## 依赖关系
//! - 被 `properties/database.rs` 使用
//! - 使用 `properties/backend.rs` 的 Chemical

use super::backend::Chemical;
use super::catalog::Attribute;
use crate::error::{MatbankError, Result};

/// 气体常数 J/(mol·K)
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// 参考温度 (K)
pub const T_REF: f64 = 298.15;

/// 正规溶液模型所需的液体组分参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidComponent {
    /// 摩尔体积 (m³/mol)
    pub molar_volume: f64,
    /// 溶解度参数 (Pa^0.5)
    pub solubility_parameter: f64,
}

impl LiquidComponent {
    /// 由分子量、密度和汽化焓构造
    pub fn from_chemical(chemical: &Chemical) -> Result<Self> {
        let mw = chemical.attribute(Attribute::MW)?;
        let rho = chemical.attribute(Attribute::Rho)?;
        let hvap = chemical.attribute(Attribute::Hvap)?;

        if mw <= 0.0 || rho <= 0.0 {
            return Err(MatbankError::InvalidMixture(format!(
                "non-positive molecular weight or density for '{}'",
                chemical.name()
            )));
        }

        let molar_volume = mw / 1000.0 / rho;
        let cohesive = hvap - GAS_CONSTANT * T_REF;
        if cohesive <= 0.0 {
            return Err(MatbankError::InvalidMixture(format!(
                "enthalpy of vaporization of '{}' is below RT",
                chemical.name()
            )));
        }

        Ok(LiquidComponent {
            molar_volume,
            solubility_parameter: (cohesive / molar_volume).sqrt(),
        })
    }
}

/// 二元正规溶液混合焓 (J/mol)
pub fn regular_solution_enthalpy(a: &LiquidComponent, b: &LiquidComponent, zs: [f64; 2]) -> f64 {
    let volume = zs[0] * a.molar_volume + zs[1] * b.molar_volume;
    if volume <= 0.0 {
        return 0.0;
    }
    let phi_a = zs[0] * a.molar_volume / volume;
    let phi_b = zs[1] * b.molar_volume / volume;
    let delta = a.solubility_parameter - b.solubility_parameter;
    volume * phi_a * phi_b * delta * delta
}
