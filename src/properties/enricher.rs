//! # 物性补充器
//!
//! 为材料表逐行补充物性列和混合焓列，最后一次性写出 parquet。
//!
//! ## 功能
//! - 校验请求的物性名称，不支持的名称警告并排除
//! - 处理任何行之前预建所有列（初始为缺失）
//! - 每行：由显示名称构造化学对象，失败则跳过该行（保持缺失）
//! - 每个物性、每个 (溶剂, 摩尔分数) 组合的失败相互隔离
//! - 每行之后按限速策略停顿
//!
//! 中途终止会丢失本次补充结果（无增量检查点）。
//!
//! ## 依赖关系
//! - 使用 `properties/backend.rs`, `properties/catalog.rs`
//! - 使用 `batch/` 顺序执行与限速
//! - 使用 `persist/` 写出结果
//! - 被 `commands/enrich.rs`, `commands/run.rs` 调用

use super::backend::PropertyBackend;
use super::catalog::{mixing_column_name, mixing_grid, supported_attribute, Attribute};
use crate::batch::{BatchRunner, ProcessResult, Throttle};
use crate::error::{MatbankError, Result};
use crate::models::MaterialTable;
use crate::persist::{self, parquet_table};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 物性名称校验结果
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Validation {
    /// 支持的物性（去重，保持首次出现顺序）
    pub accepted: Vec<(String, Attribute)>,
    /// 不支持的名称
    pub rejected: Vec<String>,
}

/// 校验请求的物性名称
pub fn validate_properties<S: AsRef<str>>(requested: &[S]) -> Validation {
    let mut validation = Validation::default();
    for name in requested {
        let name = name.as_ref();
        if validation.accepted.iter().any(|(n, _)| n == name)
            || validation.rejected.iter().any(|n| n == name)
        {
            continue;
        }
        match supported_attribute(name) {
            Some(attr) => validation.accepted.push((name.to_string(), attr)),
            None => validation.rejected.push(name.to_string()),
        }
    }
    validation
}

/// 补充统计
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnrichReport {
    /// 总行数
    pub rows: usize,
    /// 化学对象构造失败（或无名称）的行数
    pub failed_rows: usize,
    /// 被排除的物性名称
    pub rejected: Vec<String>,
    /// 写入的物性列数
    pub property_columns: usize,
    /// 写入的混合焓列数
    pub mixing_columns: usize,
    /// 缺失的单元格数（含失败行）
    pub missing_cells: usize,
}

/// 物性补充器
pub struct PropertyEnricher<'a, B: PropertyBackend + ?Sized> {
    backend: &'a B,
    throttle: &'a dyn Throttle,
    trace: bool,
}

impl<'a, B: PropertyBackend + ?Sized> PropertyEnricher<'a, B> {
    pub fn new(backend: &'a B, throttle: &'a dyn Throttle) -> Self {
        Self {
            backend,
            throttle,
            trace: true,
        }
    }

    /// 是否逐行打印追踪信息
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// 原地补充物性列与混合焓列
    pub fn enrich<S: AsRef<str>>(&self, table: &mut MaterialTable, requested: &[S]) -> EnrichReport {
        let validation = validate_properties(requested);
        for name in &validation.rejected {
            output::print_warning(&format!(
                "Property '{}' is not supported and will be ignored.",
                name
            ));
        }

        // 预建所有列
        let mixing_cols: Vec<(usize, &str, f64)> = mixing_grid()
            .map(|(solvent, x)| (table.reset_column(&mixing_column_name(solvent, x)), solvent, x))
            .collect();
        let property_cols: Vec<(usize, Attribute)> = validation
            .accepted
            .iter()
            .map(|(name, attr)| (table.reset_column(name), *attr))
            .collect();

        let names: Vec<Option<String>> = table.records().iter().map(|r| r.name.clone()).collect();
        let mut filled = 0usize;

        let runner = BatchRunner::new(self.throttle, "Enriching")
            .trace(self.trace)
            .progress(|i| format!("Material number {} processed", i));
        let result = runner.run(names, |i, name| {
            let label = format!("Error processing material at index {}", i);

            let Some(name) = name else {
                return ProcessResult::Failed(label, "compound has no name".to_string());
            };
            let chemical = match self.backend.chemical(&name) {
                Ok(chemical) => chemical,
                Err(e) => return ProcessResult::Failed(label, e.to_string()),
            };

            for &(col, attr) in &property_cols {
                let value = chemical.attribute(attr).ok();
                filled += value.is_some() as usize;
                table.set(col, i, value);
            }

            for &(col, solvent, x) in &mixing_cols {
                let value = self
                    .backend
                    .mixture([name.as_str(), solvent], [x, 1.0 - x])
                    .and_then(|mixture| mixture.enthalpy_of_mixing())
                    .ok();
                filled += value.is_some() as usize;
                table.set(col, i, value);
            }

            ProcessResult::Success(format!("Material number {} processed ({})", i, name))
        });

        let rows = table.len();
        let cells = rows * (property_cols.len() + mixing_cols.len());
        EnrichReport {
            rows,
            failed_rows: result.failed,
            rejected: validation.rejected,
            property_columns: property_cols.len(),
            mixing_columns: mixing_cols.len(),
            missing_cells: cells - filled,
        }
    }

    /// 补充后写出 `<out_dir>/<run_name>.parquet`，返回写出路径
    pub fn process_materials<S: AsRef<str>>(
        &self,
        table: &mut MaterialTable,
        requested: &[S],
        run_name: &str,
        out_dir: &Path,
    ) -> Result<(PathBuf, EnrichReport)> {
        persist::validate_run_name(run_name)?;
        if !out_dir.is_dir() {
            return Err(MatbankError::FileNotFound {
                path: out_dir.display().to_string(),
            });
        }

        let report = self.enrich(table, requested);

        let path = persist::run_output_path(out_dir, run_name, "parquet");
        parquet_table::write_table(table, &path)?;

        Ok((path, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::NoDelay;
    use crate::models::CompoundRecord;
    use crate::properties::backend::{Chemical, Mixture};
    use crate::properties::catalog::{MOLE_FRACTIONS, SOLVENTS};
    use crate::persist::csv_table;
    use crate::properties::PropertyDatabase;
    use std::cell::Cell;

    struct CountingThrottle(Cell<usize>);

    impl Throttle for CountingThrottle {
        fn pause(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    /// 只认识 toluene；toluene 无密度；与 water 的混合焓不可用
    struct MockBackend;

    impl PropertyBackend for MockBackend {
        fn chemical(&self, name: &str) -> Result<Chemical> {
            match name {
                "toluene" => Ok(Chemical::new("toluene").with(Attribute::Tm, 178.18)),
                _ => Err(MatbankError::CompoundNotFound {
                    name: name.to_string(),
                }),
            }
        }

        fn mixture(&self, components: [&str; 2], zs: [f64; 2]) -> Result<Mixture> {
            let mixture = Mixture::new(components, zs)?;
            if components[1] == "water" {
                return Ok(mixture);
            }
            Ok(mixture.with_enthalpy_of_mixing(100.0 * zs[0]))
        }
    }

    fn table() -> MaterialTable {
        vec![
            CompoundRecord::new(1, "X").with_name("unobtainium"),
            CompoundRecord::new(1140, "CC1=CC=CC=C1").with_name("toluene"),
            CompoundRecord::new(3, "Y"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_validate_properties() {
        let v = validate_properties(&["density", "heat capacity", "density", "melting point"]);
        assert_eq!(
            v.accepted,
            vec![
                ("density".to_string(), Attribute::Rho),
                ("melting point".to_string(), Attribute::Tm)
            ]
        );
        assert_eq!(v.rejected, vec!["heat capacity".to_string()]);
    }

    #[test]
    fn test_failures_are_isolated() {
        let mut table = table();
        let enricher = PropertyEnricher::new(&MockBackend, &NoDelay).trace(false);
        let report = enricher.enrich(&mut table, &["melting point", "density", "colour"]);

        assert_eq!(report.rows, 3);
        assert_eq!(report.failed_rows, 2);
        assert_eq!(report.rejected, vec!["colour".to_string()]);
        assert_eq!(report.property_columns, 2);
        assert_eq!(report.mixing_columns, 12);
        assert!(table.column("colour").is_none());

        // 失败行：全部缺失
        for row in [0, 2] {
            assert!(table.columns().iter().all(|c| c.values[row].is_none()));
        }

        // 成功行：各单元格独立
        assert_eq!(table.value("melting point", 1), Some(178.18));
        assert_eq!(table.value("density", 1), None);
        for x in MOLE_FRACTIONS {
            assert_eq!(
                table.value(&mixing_column_name("water", x), 1),
                None
            );
            assert_eq!(
                table.value(&mixing_column_name("hexane", x), 1),
                Some(100.0 * x)
            );
        }

        // 1 个物性 + 9 个混合焓有值
        assert_eq!(report.missing_cells, 3 * 14 - 10);
    }

    #[test]
    fn test_pause_after_every_row() {
        let mut table = table();
        let throttle = CountingThrottle(Cell::new(0));
        let enricher = PropertyEnricher::new(&MockBackend, &throttle).trace(false);
        let report = enricher.enrich(&mut table, &["melting point"]);

        // 失败行同样停顿
        assert_eq!(report.failed_rows, 2);
        assert_eq!(throttle.0.get(), 3);

        let throttle = CountingThrottle(Cell::new(0));
        let enricher = PropertyEnricher::new(&MockBackend, &throttle).trace(false);
        enricher.enrich(&mut MaterialTable::new(), &["melting point"]);
        assert_eq!(throttle.0.get(), 0);
    }

    #[test]
    fn test_input_text_columns_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank.csv");
        std::fs::write(
            &input,
            "CID,smiles,name,formula,supplier\n1140,CC1=CC=CC=C1,toluene,C7H8,acme\n",
        )
        .unwrap();
        let mut table = csv_table::read_table(&input).unwrap();

        let db = PropertyDatabase::embedded().unwrap();
        let enricher = PropertyEnricher::new(&db, &NoDelay).trace(false);
        let (path, _) = enricher
            .process_materials(&mut table, &["density"], "screen", dir.path())
            .unwrap();

        let written = parquet_table::read_table(&path).unwrap();
        assert_eq!(written.text("supplier", 0), Some("acme"));
        assert_eq!(written.records()[0].formula.as_deref(), Some("C7H8"));
        assert_eq!(written.value("density", 0), Some(862.2));
        assert_eq!(written.column_names().len(), 13);
    }

    #[test]
    fn test_columns_exist_for_empty_table() {
        let mut table = MaterialTable::new();
        let enricher = PropertyEnricher::new(&MockBackend, &NoDelay).trace(false);
        enricher.enrich(&mut table, &["boiling point"]);
        assert_eq!(table.columns().len(), 13);
        assert!(table.column("boiling point").is_some());
    }

    #[test]
    fn test_stale_values_are_reset() {
        let mut table = table();
        let col = table.ensure_column("melting point");
        table.set(col, 0, Some(1.0));

        let enricher = PropertyEnricher::new(&MockBackend, &NoDelay).trace(false);
        enricher.enrich(&mut table, &["melting point"]);
        assert_eq!(table.value("melting point", 0), None);
    }

    #[test]
    fn test_process_materials_with_database() {
        let db = PropertyDatabase::embedded().unwrap();
        let mut table: MaterialTable =
            vec![CompoundRecord::new(1140, "CC1=CC=CC=C1").with_name("toluene")]
                .into_iter()
                .collect();

        let dir = tempfile::tempdir().unwrap();
        let enricher = PropertyEnricher::new(&db, &NoDelay).trace(false);
        let (path, report) = enricher
            .process_materials(
                &mut table,
                &["melting point", "density", "heat capacity"],
                "screen",
                dir.path(),
            )
            .unwrap();

        assert_eq!(path, dir.path().join("screen.parquet"));
        assert_eq!(report.failed_rows, 0);
        assert_eq!(report.missing_cells, 0);

        let written = parquet_table::read_table(&path).unwrap();
        let names = written.column_names();
        assert_eq!(names.len(), 14);
        assert!(names.contains(&"melting point"));
        assert!(names.contains(&"density"));
        assert!(!names.contains(&"heat capacity"));
        for solvent in SOLVENTS {
            for x in MOLE_FRACTIONS {
                let value = written.value(&mixing_column_name(solvent, x), 0).unwrap();
                assert!(value >= 0.0);
            }
        }
        assert_eq!(written.value("melting point", 0), Some(178.18));
    }

    #[test]
    fn test_process_materials_rejects_bad_run_name() {
        let mut table = table();
        let dir = tempfile::tempdir().unwrap();
        let enricher = PropertyEnricher::new(&MockBackend, &NoDelay).trace(false);
        assert!(enricher
            .process_materials(&mut table, &["density"], "", dir.path())
            .is_err());
        // 未开始补充
        assert!(table.columns().is_empty());
    }
}
