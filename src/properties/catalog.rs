//! # 物性目录
//!
//! 固定的、进程级不可变的目录：
//! - 支持的物性名称 -> 化学对象属性键
//! - 溶剂列表与摩尔分数列表（二者笛卡尔积构成混合焓列）
//!
//! ## 依赖关系
//! - 被 `properties/enricher.rs`, `properties/database.rs` 使用
//! - 被 `commands/properties.rs` 列出

/// 化学对象属性键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    /// 沸点 (K)
    Tb,
    /// 熔点 (K)
    Tm,
    /// 黏度 (Pa·s)
    Mu,
    /// 密度 (kg/m³)
    Rho,
    /// 热导率 (W/m/K)
    K,
    /// 饱和蒸气压 (Pa)
    Psat,
    /// 相对介电常数
    Permittivity,
    /// 闪点 (K)
    Tflash,
    /// 自燃温度 (K)
    Tautoignition,
    /// 燃烧热 (J/mol)
    Hc,
    /// 生成焓 (J/mol)
    Hf,
    /// 临界温度 (K)
    Tc,
    /// 临界压力 (Pa)
    Pc,
    /// 临界体积 (m³/mol)
    Vc,
    /// 三相点温度 (K)
    Tt,
    /// 三相点压力 (Pa)
    Pt,
    /// 表面张力 (N/m)
    Sigma,
    /// 分子量 (g/mol)
    MW,
    /// 亨利常数 (Pa·m³/mol)
    Henry,
    /// 偶极矩 (debye)
    Dipole,
    /// 汽化焓 (J/mol)，仅用于混合焓估算
    Hvap,
}

impl Attribute {
    pub const ALL: [Attribute; 21] = [
        Attribute::Tb,
        Attribute::Tm,
        Attribute::Mu,
        Attribute::Rho,
        Attribute::K,
        Attribute::Psat,
        Attribute::Permittivity,
        Attribute::Tflash,
        Attribute::Tautoignition,
        Attribute::Hc,
        Attribute::Hf,
        Attribute::Tc,
        Attribute::Pc,
        Attribute::Vc,
        Attribute::Tt,
        Attribute::Pt,
        Attribute::Sigma,
        Attribute::MW,
        Attribute::Henry,
        Attribute::Dipole,
        Attribute::Hvap,
    ];

    /// 属性键（与物性数据库的列名一致）
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Tb => "Tb",
            Attribute::Tm => "Tm",
            Attribute::Mu => "mu",
            Attribute::Rho => "rho",
            Attribute::K => "k",
            Attribute::Psat => "Psat",
            Attribute::Permittivity => "permittivity",
            Attribute::Tflash => "Tflash",
            Attribute::Tautoignition => "Tautoignition",
            Attribute::Hc => "Hc",
            Attribute::Hf => "Hf",
            Attribute::Tc => "Tc",
            Attribute::Pc => "Pc",
            Attribute::Vc => "Vc",
            Attribute::Tt => "Tt",
            Attribute::Pt => "Pt",
            Attribute::Sigma => "sigma",
            Attribute::MW => "MW",
            Attribute::Henry => "Henry",
            Attribute::Dipole => "dipole",
            Attribute::Hvap => "Hvap",
        }
    }

    pub fn from_key(key: &str) -> Option<Attribute> {
        Attribute::ALL.iter().copied().find(|a| a.key() == key)
    }

    /// 单位
    pub fn unit(&self) -> &'static str {
        match self {
            Attribute::Tb
            | Attribute::Tm
            | Attribute::Tflash
            | Attribute::Tautoignition
            | Attribute::Tc
            | Attribute::Tt => "K",
            Attribute::Mu => "Pa·s",
            Attribute::Rho => "kg/m³",
            Attribute::K => "W/m/K",
            Attribute::Psat | Attribute::Pc | Attribute::Pt => "Pa",
            Attribute::Permittivity => "-",
            Attribute::Hc | Attribute::Hf | Attribute::Hvap => "J/mol",
            Attribute::Vc => "m³/mol",
            Attribute::Sigma => "N/m",
            Attribute::MW => "g/mol",
            Attribute::Henry => "Pa·m³/mol",
            Attribute::Dipole => "debye",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 支持的物性：名称 -> 属性键
pub const SUPPORTED_PROPERTIES: [(&str, Attribute); 20] = [
    ("boiling point", Attribute::Tb),
    ("melting point", Attribute::Tm),
    ("viscosity", Attribute::Mu),
    ("density", Attribute::Rho),
    ("thermal conductivity", Attribute::K),
    ("vapour pressure", Attribute::Psat),
    ("permittivity", Attribute::Permittivity),
    ("flash point", Attribute::Tflash),
    ("auto ignition temperature", Attribute::Tautoignition),
    ("heat of combustion", Attribute::Hc),
    ("enthalpy of formation", Attribute::Hf),
    ("critical temperature", Attribute::Tc),
    ("critical pressure", Attribute::Pc),
    ("critical volume", Attribute::Vc),
    ("triple point temperature", Attribute::Tt),
    ("triple point pressure", Attribute::Pt),
    ("surface tension", Attribute::Sigma),
    ("molecular weight", Attribute::MW),
    ("Henry's law constant", Attribute::Henry),
    ("dipole moment", Attribute::Dipole),
];

/// 混合焓计算所用溶剂
pub const SOLVENTS: [&str; 4] = ["water", "hexane", "ethanol", "acetonitrile"];

/// 目标化合物的摩尔分数（溶剂为 1 - x）
pub const MOLE_FRACTIONS: [f64; 3] = [0.25, 0.5, 0.75];

/// 查找支持的物性
pub fn supported_attribute(property: &str) -> Option<Attribute> {
    SUPPORTED_PROPERTIES
        .iter()
        .find(|(name, _)| *name == property)
        .map(|(_, attr)| *attr)
}

/// 混合焓列名，例如 `water_fraction_0.25_enthalpy_mixing`
pub fn mixing_column_name(solvent: &str, fraction: f64) -> String {
    format!("{}_fraction_{}_enthalpy_mixing", solvent, fraction)
}

/// 所有 (溶剂, 摩尔分数) 组合，溶剂优先
pub fn mixing_grid() -> impl Iterator<Item = (&'static str, f64)> {
    SOLVENTS
        .iter()
        .flat_map(|&solvent| MOLE_FRACTIONS.iter().map(move |&x| (solvent, x)))
}
