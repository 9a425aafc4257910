//! # plot 命令实现
//!
//! 将 `mueller_scatgrid` 按 PHIPS 探测器分箱，并与测量数据对比绘图。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 批量模式并行处理（rayon）
//! - 输出图像 (PNG/SVG) 或数据文件 (CSV/XY)
//! - 自定义探测器中心（phips_bins.toml）
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 PlotArgs / PlotOptions
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `phips/` 模块分箱与绘图
//! - 被 `commands/run.rs` 复用（自动绘图）

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::plot::{OutputFormat, PlotArgs, PlotOptions};
use crate::error::{LscatError, Result};
use crate::models::{BinnedPattern, Series};
use crate::parsers::{self, bins::DEFAULT_BINS_FILE, reference::DEFAULT_REFERENCE_FILE};
use crate::phips::{export, PhipsConfig, PlotManager};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 计算曲线的图例
pub const COMPUTED_LABEL: &str = "GOAD";

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("PHIPS Detector Comparison");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(LscatError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &PlotArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let job = PlotJob::from_options(&args.options, None)?;
    let format = args.format.unwrap_or_else(|| format_from_path(&args.output));

    let pattern = job.process(&args.input, &args.output, format)?;
    print_bin_table(&pattern);
    output::print_success(&format!(
        "{} of {} bins filled, written to {}",
        pattern.filled(),
        pattern.bins.len(),
        args.output.display()
    ));
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &PlotArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} result files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| LscatError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let format = args.format.unwrap_or(OutputFormat::Png);
    output::print_info(&format!("Output format: {}", format));

    // 参考数据与探测器配置只读取一次
    let job = PlotJob::from_options(&args.options, None)?;

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));

    let result = runner.run(files, |file| {
        process_batch_file(&job, &args.input, file, &args.output, format, args.overwrite)
    })?;

    output::print_separator();
    output::print_done(&format!(
        "Batch complete: {} files ({} success, {} skipped, {} failed)",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理批量模式中的单个文件
fn process_batch_file(
    job: &PlotJob,
    root: &Path,
    input: &Path,
    output_dir: &Path,
    format: OutputFormat,
    overwrite: bool,
) -> ProcessResult {
    let name = batch_output_name(root, input);
    let output_file = output_dir.join(format!("{}_phips.{}", name, format.extension()));

    if output_file.exists() && !overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match job.process(input, &output_file, format) {
        Ok(pattern) => ProcessResult::Success(format!(
            "{} -> {} ({}/{} bins)",
            input.display(),
            output_file.display(),
            pattern.filled(),
            pattern.bins.len()
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 批量输出名：相对批量根目录的路径各段以 `_` 连接，保证不同输入互不覆盖
fn batch_output_name(root: &Path, input: &Path) -> String {
    let rel = input.strip_prefix(root).unwrap_or(input);
    let dirs: Vec<&str> = rel
        .parent()
        .map(|p| p.iter().filter_map(|c| c.to_str()).collect())
        .unwrap_or_default();
    if dirs.is_empty() {
        return parsers::mueller::grid_name(input);
    }

    let file = rel.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let mut parts = dirs;
    match parsers::mueller::grid_suffix(file) {
        Some("") => {}
        Some(suffix) => parts.push(suffix),
        None => parts.push(
            rel.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file),
        ),
    }
    parts.join("_")
}

/// 一次绘图所需的全部配置
pub struct PlotJob {
    pub config: PhipsConfig,
    pub reference: Option<Series>,
    pub manager: PlotManager,
    custom_title: bool,
}

impl PlotJob {
    /// 由命令行选项构造，读取探测器中心与参考数据
    ///
    /// 默认的 bins 与参考文件在 `base_dir`（缺省为当前目录）中查找。
    pub fn from_options(opts: &PlotOptions, base_dir: Option<&Path>) -> Result<Self> {
        let centers = match resolve_optional_file(opts.bins.as_deref(), DEFAULT_BINS_FILE, base_dir)? {
            Some(path) => {
                let centers = parsers::parse_bins(&path)?;
                output::print_info(&format!(
                    "Loaded {} detector centres from {}",
                    centers.len(),
                    path.display()
                ));
                Some(centers)
            }
            None => None,
        };

        let config = PhipsConfig {
            wavelength: opts.wavelength,
            detectors: opts.detectors,
            start: opts.start,
            end: opts.end,
            bin_width: opts.bin_width,
            centers,
        };
        config.validate()?;

        let reference = if opts.no_reference {
            None
        } else {
            match resolve_optional_file(opts.reference.as_deref(), DEFAULT_REFERENCE_FILE, base_dir)? {
                Some(path) => match parsers::parse_reference(&path, &opts.reference_label) {
                    Ok(series) => {
                        output::print_info(&format!(
                            "Loaded {} measured points from {}",
                            series.points.len(),
                            path.display()
                        ));
                        Some(series)
                    }
                    // 参考数据读取失败时仍绘制计算曲线
                    Err(e) => {
                        output::print_error(&format!("Error loading reference data: {}", e));
                        None
                    }
                },
                None => {
                    output::print_info(&format!(
                        "PHIPS data file not found: {} (plotting computed values only)",
                        DEFAULT_REFERENCE_FILE
                    ));
                    None
                }
            }
        };

        let mut manager = PlotManager::new().with_size(opts.width, opts.height);
        if let Some(title) = &opts.title {
            manager = manager.with_title(title.as_str());
        }

        Ok(PlotJob {
            config,
            reference,
            manager,
            custom_title: opts.title.is_some(),
        })
    }

    /// 读取、分箱并写出一个结果文件
    pub fn process(&self, input: &Path, output: &Path, format: OutputFormat) -> Result<BinnedPattern> {
        let grid = parsers::parse_scatgrid(input)?;
        if grid.is_empty() {
            output::print_warning(&format!("No scattering points in {}", input.display()));
        }
        tracing::info!("Loaded {} scattering points from {}", grid.len(), input.display());
        if let Some((lo, hi)) = grid.theta_range() {
            tracing::debug!("theta range {:.1}-{:.1}°", lo, hi);
        }

        let pattern = self.config.bin(&grid);
        for line in pattern.log_lines() {
            tracing::info!("{}", line);
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LscatError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        match format {
            OutputFormat::Png | OutputFormat::Svg => {
                let computed = pattern.to_series(COMPUTED_LABEL);
                self.manager_for(&pattern).render(
                    &computed,
                    self.reference.as_ref(),
                    output,
                    format == OutputFormat::Svg,
                )?;
            }
            OutputFormat::Csv => export::to_csv(&pattern, output)?,
            OutputFormat::Xy => export::to_xy(&pattern, output)?,
        }

        Ok(pattern)
    }

    /// 批量模式下标题附带数据名称
    fn manager_for(&self, pattern: &BinnedPattern) -> PlotManager {
        if self.custom_title || pattern.name.is_empty() {
            self.manager.clone()
        } else {
            let title = format!("{} ({})", self.manager.title, pattern.name);
            self.manager.clone().with_title(title)
        }
    }
}

/// 显式给出的文件必须存在；否则仅在默认文件存在时使用
fn resolve_optional_file(
    explicit: Option<&Path>,
    default: &str,
    base_dir: Option<&Path>,
) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(LscatError::FileNotFound {
            path: path.display().to_string(),
        }),
        None => {
            let path = match base_dir {
                Some(dir) => dir.join(default),
                None => PathBuf::from(default),
            };
            Ok(path.is_file().then_some(path))
        }
    }
}

/// 由扩展名推断输出格式，无法识别时使用 PNG
pub fn format_from_path(path: &Path) -> OutputFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("svg") => OutputFormat::Svg,
        Some("csv") => OutputFormat::Csv,
        Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
        Some("png") => OutputFormat::Png,
        other => {
            tracing::warn!("Unknown output extension {:?}, writing PNG", other);
            OutputFormat::Png
        }
    }
}

/// 打印分箱结果表格
pub fn print_bin_table(pattern: &BinnedPattern) {
    #[derive(Tabled)]
    struct BinRow {
        #[tabled(rename = "Bin")]
        index: usize,
        #[tabled(rename = "θ (°)")]
        center: String,
        #[tabled(rename = "Points")]
        count: usize,
        #[tabled(rename = "Mean DSCS")]
        mean: String,
    }

    let rows: Vec<BinRow> = pattern
        .bins
        .iter()
        .map(|b| BinRow {
            index: b.index,
            center: format!("{:.1}", b.center),
            count: b.count,
            mean: b
                .mean
                .map(|v| format!("{:.6e}", v))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("PHIPS Bins: {}", pattern.name));
        println!("{}", Table::new(&rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PlotOptions {
        PlotOptions {
            bins: None,
            reference: None,
            no_reference: true,
            reference_label: "PHIPS".to_string(),
            wavelength: 0.532,
            detectors: 20,
            start: 18.0,
            end: 170.0,
            bin_width: 8.0,
            width: 640,
            height: 480,
            title: None,
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(format_from_path(Path::new("a/plot.svg")), OutputFormat::Svg);
        assert_eq!(format_from_path(Path::new("plot.CSV")), OutputFormat::Csv);
        assert_eq!(format_from_path(Path::new("plot.xy")), OutputFormat::Xy);
        assert_eq!(format_from_path(Path::new("plot.png")), OutputFormat::Png);
        assert_eq!(format_from_path(Path::new("plot")), OutputFormat::Png);
    }

    #[test]
    fn test_resolve_optional_file() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("bins.toml");
        std::fs::write(&present, "bins = [20.0]").unwrap();

        assert_eq!(
            resolve_optional_file(Some(present.as_path()), "unused", None).unwrap(),
            Some(present.clone())
        );
        assert!(matches!(
            resolve_optional_file(Some(dir.path().join("missing.toml").as_path()), "unused", None),
            Err(LscatError::FileNotFound { .. })
        ));
        assert_eq!(
            resolve_optional_file(None, "definitely_missing_default_lscat.toml", None).unwrap(),
            None
        );
    }

    #[test]
    fn test_default_files_found_in_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_BINS_FILE), "bins = [30.0, 40.0]").unwrap();

        assert_eq!(
            resolve_optional_file(None, DEFAULT_BINS_FILE, Some(dir.path())).unwrap(),
            Some(dir.path().join(DEFAULT_BINS_FILE))
        );
        let job = PlotJob::from_options(&options(), Some(dir.path())).unwrap();
        assert_eq!(job.config.centers, Some(vec![30.0, 40.0]));
    }

    #[test]
    fn test_bad_reference_still_plots() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("phips.txt");
        std::fs::write(&reference, "// angle dscs\n18 1.0\n26 bad\n").unwrap();
        let input = dir.path().join("mueller_scatgrid");
        std::fs::write(&input, "20.0 0.0 1.0\n").unwrap();

        let mut opts = options();
        opts.no_reference = false;
        opts.reference = Some(reference);
        let job = PlotJob::from_options(&opts, None).unwrap();
        assert!(job.reference.is_none());

        let out = dir.path().join("out.xy");
        job.process(&input, &out, OutputFormat::Xy).unwrap();
        assert!(out.is_file());
    }

    #[test]
    fn test_process_csv_with_custom_bins() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = dir.path().join("run_a");
        std::fs::create_dir_all(&run_dir).unwrap();
        let input = run_dir.join("mueller_scatgrid");
        std::fs::write(&input, "20.0 0.0 1.0\n22.0 0.0 3.0\n100.0 0.0 5.0\n").unwrap();
        let bins = dir.path().join("bins.toml");
        std::fs::write(&bins, "bins = [21.0, 60.0]").unwrap();

        let mut opts = options();
        opts.bins = Some(bins);
        let job = PlotJob::from_options(&opts, None).unwrap();
        let out = dir.path().join("out/result.csv");
        let pattern = job.process(&input, &out, OutputFormat::Csv).unwrap();

        assert_eq!(pattern.name, "run_a");
        assert_eq!(pattern.bins.len(), 2);
        assert_eq!(pattern.bins[0].count, 2);
        assert!(pattern.bins[1].mean.is_none());

        let csv = std::fs::read_to_string(&out).unwrap();
        assert!(csv.starts_with("theta_deg,points,mean_dscs"));
        assert!(csv.contains("nan"));
    }

    #[test]
    fn test_process_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mueller_scatgrid");
        std::fs::write(&input, "20.0 0.0 1.0\n30.0 0.0 2.0\n60.0 0.0 0.5\n").unwrap();

        let job = PlotJob::from_options(&options(), None).unwrap();
        let out = dir.path().join("plot.png");
        job.process(&input, &out, OutputFormat::Png).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_batch_output_names_distinct() {
        let root = Path::new("root");
        assert_eq!(
            batch_output_name(root, Path::new("root/goad_run/mueller_scatgrid")),
            "goad_run"
        );
        assert_eq!(
            batch_output_name(root, Path::new("root/goad_run/mueller_scatgrid_1d")),
            "goad_run_1d"
        );
        assert_eq!(
            batch_output_name(root, Path::new("root/a/goad_run/mueller_scatgrid")),
            "a_goad_run"
        );
        assert_eq!(
            batch_output_name(root, Path::new("root/b/goad_run/mueller_scatgrid")),
            "b_goad_run"
        );
        assert_eq!(batch_output_name(root, Path::new("root/plate.dat")), "plate");
    }

    #[test]
    fn test_batch_file_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = dir.path().join("goad_run");
        std::fs::create_dir_all(&run_dir).unwrap();
        let input = run_dir.join("mueller_scatgrid");
        std::fs::write(&input, "20.0 0.0 1.0\n").unwrap();
        let out_dir = dir.path().join("plots");
        std::fs::create_dir_all(&out_dir).unwrap();

        let job = PlotJob::from_options(&options(), None).unwrap();
        std::fs::write(out_dir.join("goad_run_phips.xy"), "old").unwrap();

        assert!(matches!(
            process_batch_file(&job, dir.path(), &input, &out_dir, OutputFormat::Xy, false),
            ProcessResult::Skipped(_)
        ));
        assert!(matches!(
            process_batch_file(&job, dir.path(), &input, &out_dir, OutputFormat::Xy, true),
            ProcessResult::Success(_)
        ));
    }

    #[test]
    fn test_invalid_binning_rejected() {
        let mut opts = options();
        opts.bin_width = 0.0;
        assert!(PlotJob::from_options(&opts, None).is_err());
    }
}
