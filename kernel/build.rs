//! Rux 信号量子系统构建脚本
//!
//! 这个脚本在编译前运行，负责：
//! 1. 解析 Kernel.toml（或 menuconfig 生成的 build/.config）
//! 2. 生成 `$OUT_DIR/config.rs` 配置常量
//!
//! 配置文件缺失或字段缺失时使用默认值

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_INITIAL_CAPACITY: i64 = 16;
const DEFAULT_MAX_CAPACITY: i64 = 32768;
const DEFAULT_NAME_MAX: i64 = 64;
const DEFAULT_LOG_LEVEL: &str = "info";

/// 解析 build/.config 文件（简单 key=value 格式）
///
/// `semaphore_initial_capacity=32` 被解析为 `[semaphore] initial_capacity = 32`
fn parse_dot_config(content: &str) -> toml::Value {
    let mut sections: HashMap<String, HashMap<String, toml::Value>> = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // 跳过注释和空行
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();

        // 使用第一个下划线分割 section 和 key
        let Some((section, config_key)) = key.trim().split_once('_') else {
            continue;
        };

        let parsed_value = if value == "true" {
            toml::Value::Boolean(true)
        } else if value == "false" {
            toml::Value::Boolean(false)
        } else if let Ok(int_val) = value.parse::<i64>() {
            toml::Value::Integer(int_val)
        } else {
            toml::Value::String(value.trim_matches('"').to_string())
        };

        sections
            .entry(section.to_string())
            .or_default()
            .insert(config_key.to_string(), parsed_value);
    }

    let mut root_map = toml::map::Map::new();
    for (section_name, section_data) in sections {
        let mut toml_map = toml::map::Map::new();
        for (k, v) in section_data {
            toml_map.insert(k, v);
        }
        root_map.insert(section_name, toml::Value::Table(toml_map));
    }

    toml::Value::Table(root_map)
}

fn config_int(config: &toml::Value, section: &str, key: &str, default: i64) -> i64 {
    config
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_integer())
        .unwrap_or(default)
}

fn config_str<'a>(config: &'a toml::Value, section: &str, key: &str, default: &'a str) -> &'a str {
    config
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or(default)
}

/// 把日志级别字符串映射为 `log::LevelFilter` 变体名
fn level_filter_variant(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "off" => "Off",
        "error" => "Error",
        "warn" => "Warn",
        "debug" => "Debug",
        "trace" => "Trace",
        _ => "Info",
    }
}

fn generate_config_code(config: &toml::Value) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR 未设置"));

    // 容量至少为 1，否则翻倍扩容无法前进
    let initial_capacity = config_int(config, "semaphore", "initial_capacity", DEFAULT_INITIAL_CAPACITY).max(1);
    let max_capacity = config_int(config, "semaphore", "max_capacity", DEFAULT_MAX_CAPACITY).max(initial_capacity);
    // 名称长度保存在 u8 中
    let name_max = config_int(config, "semaphore", "name_max", DEFAULT_NAME_MAX).clamp(1, 255);
    let log_level = level_filter_variant(config_str(config, "log", "level", DEFAULT_LOG_LEVEL));

    let config_code = format!(
        r#"// Rux 信号量子系统配置（自动生成）
//
// 此文件由 build.rs 根据 Kernel.toml 自动生成，请勿手动修改

/// 信号量池初始容量
pub const SEM_INITIAL_CAPACITY: usize = {};

/// 信号量池容量上限 (SEMMNI)
pub const SEM_MAX_CAPACITY: usize = {};

/// 信号量名称最大长度（字节）
pub const SEM_NAME_MAX: usize = {};

/// 默认日志级别
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::{};
"#,
        initial_capacity, max_capacity, name_max, log_level,
    );

    let config_file = out_dir.join("config.rs");

    // 只有内容变化时才写入，避免每次编译都更新文件时间戳
    let existing_content = fs::read_to_string(&config_file).unwrap_or_default();
    if existing_content != config_code {
        fs::write(&config_file, &config_code).expect("写入配置文件失败");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=../Kernel.toml");
    println!("cargo:rerun-if-changed=../build/.config");

    // 优先读取 build/.config（menuconfig 生成的配置），回退到 Kernel.toml
    let config = if let Ok(content) = fs::read_to_string("../build/.config") {
        println!("cargo:warning=Using build/.config configuration");
        parse_dot_config(&content)
    } else if let Ok(content) = fs::read_to_string("../Kernel.toml") {
        match toml::from_str::<toml::Value>(&content) {
            Ok(value) => value,
            Err(e) => {
                println!("cargo:warning=Kernel.toml 解析失败，使用默认配置: {}", e);
                toml::Value::Table(toml::map::Map::new())
            }
        }
    } else {
        toml::Value::Table(toml::map::Map::new())
    };

    generate_config_code(&config);
}
