//! # 物性后端接口
//!
//! 物性估算库以两个构造器的形式被使用：
//! - `chemical(name)`：单一化合物，按属性键暴露标量物性
//! - `mixture([a, b], [z, 1 - z])`：二元混合物，暴露混合焓
//!
//! 单个属性不可用是常见结果而非异常，因此以 `Result` 值返回。
//!
//! ## 依赖关系
//! - 被 `properties/enricher.rs` 调用
//! - 由 `properties/database.rs` 实现

use super::catalog::Attribute;
use crate::error::{MatbankError, Result};

use std::collections::BTreeMap;

/// 物性后端
pub trait PropertyBackend {
    /// 由名称构造化学对象
    fn chemical(&self, name: &str) -> Result<Chemical>;

    /// 由两个组分名称和摩尔分数构造二元混合物
    fn mixture(&self, components: [&str; 2], zs: [f64; 2]) -> Result<Mixture>;
}

/// 化学对象
#[derive(Debug, Clone, PartialEq)]
pub struct Chemical {
    name: String,
    values: BTreeMap<Attribute, f64>,
}

impl Chemical {
    pub fn new(name: impl Into<String>) -> Self {
        Chemical {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// 设置属性（非有限值忽略）
    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        self.insert(attribute, value);
        self
    }

    pub fn insert(&mut self, attribute: Attribute, value: f64) {
        if value.is_finite() {
            self.values.insert(attribute, value);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 读取属性
    pub fn attribute(&self, attribute: Attribute) -> Result<f64> {
        self.values
            .get(&attribute)
            .copied()
            .ok_or_else(|| MatbankError::MissingAttribute {
                compound: self.name.clone(),
                attribute: attribute.key().to_string(),
            })
    }
}

/// 二元混合物
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    components: [String; 2],
    zs: [f64; 2],
    enthalpy_of_mixing: Option<f64>,
}

impl Mixture {
    /// 校验摩尔分数：每项在 [0, 1] 内且总和为 1
    pub fn new(components: [&str; 2], zs: [f64; 2]) -> Result<Self> {
        if zs.iter().any(|z| !(0.0..=1.0).contains(z)) || (zs[0] + zs[1] - 1.0).abs() > 1e-9 {
            return Err(MatbankError::InvalidMixture(format!(
                "mole fractions {:?} must lie in [0, 1] and sum to 1",
                zs
            )));
        }
        Ok(Mixture {
            components: [components[0].to_string(), components[1].to_string()],
            zs,
            enthalpy_of_mixing: None,
        })
    }

    pub fn with_enthalpy_of_mixing(mut self, value: f64) -> Self {
        self.enthalpy_of_mixing = Some(value).filter(|v| v.is_finite());
        self
    }

    pub fn components(&self) -> [&str; 2] {
        [&self.components[0], &self.components[1]]
    }

    pub fn zs(&self) -> [f64; 2] {
        self.zs
    }

    /// 混合焓 (J/mol)
    pub fn enthalpy_of_mixing(&self) -> Result<f64> {
        self.enthalpy_of_mixing
            .ok_or_else(|| MatbankError::MissingAttribute {
                compound: format!("{} + {}", self.components[0], self.components[1]),
                attribute: "Hm".to_string(),
            })
    }
}
