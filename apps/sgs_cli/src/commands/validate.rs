// apps/sgs_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 检查 LES 配置文件能否解析，取值是否有效，以及其中的模型、滤波器、
//! 滤波宽度名称是否已注册。

use anyhow::{bail, Context, Result};
use clap::Args;
use sgs_config::LesProperties;
use sgs_physics::{DELTA_TYPES, FILTER_TYPES, MODEL_TYPES};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 已知的顶层键
const TOP_LEVEL_KEYS: &[&str] = &["model", "printCoeffs", "delta", "coeffs"];

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== LES 配置验证: {} ===", args.config.display());

    let content = std::fs::read_to_string(&args.config)
        .with_context(|| format!("无法读取配置文件: {}", args.config.display()))?;

    let mut result = ValidationResult::default();
    check_unknown_keys(&content, &mut result);

    match LesProperties::from_json_str(&content) {
        Ok(props) => check_registered_names(&props, &mut result),
        Err(e) => result.add_error(e.to_string()),
    }

    print_validation_result(&result, args.strict)
}

fn check_unknown_keys(content: &str, result: &mut ValidationResult) {
    let json: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        // 解析错误由 LesProperties 报告
        Err(_) => return,
    };

    let Some(object) = json.as_object() else {
        result.add_error("配置顶层必须是 JSON 对象");
        return;
    };

    for key in object.keys() {
        if !TOP_LEVEL_KEYS.contains(&key.as_str()) {
            result.add_warning(format!("未使用的配置键: {}", key));
        }
    }
}

fn check_registered_names(props: &LesProperties, result: &mut ValidationResult) {
    if !MODEL_TYPES.contains(&props.model.as_str()) {
        result.add_error(format!(
            "未知的 SGS 模型 '{}' (可用: {})",
            props.model,
            MODEL_TYPES.join(", ")
        ));
    }

    if !FILTER_TYPES.contains(&props.coeffs.filter.as_str()) {
        result.add_error(format!(
            "未知的滤波器类型 '{}' (可用: {})",
            props.coeffs.filter,
            FILTER_TYPES.join(", ")
        ));
    } else if props.coeffs.filter == "laplace" && props.coeffs.width_coeff.is_none() {
        result.add_error("laplace 滤波器需要 coeffs.widthCoeff");
    } else if props.coeffs.filter != "laplace" && props.coeffs.width_coeff.is_some() {
        result.add_warning(format!("{} 滤波器不使用 coeffs.widthCoeff", props.coeffs.filter));
    }

    if !DELTA_TYPES.contains(&props.delta.kind.as_str()) {
        result.add_error(format!(
            "未知的滤波宽度类型 '{}' (可用: {})",
            props.delta.kind,
            DELTA_TYPES.join(", ")
        ));
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let mut result = ValidationResult::default();
        check_registered_names(&LesProperties::default(), &mut result);
        assert!(result.is_ok_strict());
    }

    #[test]
    fn test_unregistered_names_are_errors() {
        let mut props = LesProperties::default().with_filter("box");
        props.delta.kind = "smooth".into();
        let mut result = ValidationResult::default();
        check_registered_names(&props, &mut result);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_laplace_requires_width() {
        let props = LesProperties::default().with_filter("laplace");
        let mut result = ValidationResult::default();
        check_registered_names(&props, &mut result);
        assert!(!result.is_ok());
    }

    #[test]
    fn test_unknown_key_is_warning() {
        let mut result = ValidationResult::default();
        check_unknown_keys(r#"{ "model": "x", "turbulence": true }"#, &mut result);
        assert!(result.is_ok());
        assert!(!result.is_ok_strict());
    }
}
