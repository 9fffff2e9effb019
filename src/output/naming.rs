// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/output/naming.rs - 输出文件命名策略
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const IMAGE_EXTENSION: &str = "png";
const METADATA_EXTENSION: &str = "txt";

/// 去掉对象 key 最后一个 `.` 之后的扩展名
pub fn base_name(key: &str) -> &str {
  key.rsplit_once('.').map(|(base, _)| base).unwrap_or(key)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
  pub image_name: String,
  pub metadata_name: String,
}

pub trait OutputNaming {
  fn names(&self, key: &str) -> ArtifactNames;
}

/// `labeled_{base}.png` 与 `{base}_metadata.txt`，重复运行会覆盖
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticNaming;

impl OutputNaming for StaticNaming {
  fn names(&self, key: &str) -> ArtifactNames {
    let base = base_name(key);
    ArtifactNames {
      image_name: format!("labeled_{}.{}", base, IMAGE_EXTENSION),
      metadata_name: format!("{}_metadata.{}", base, METADATA_EXTENSION),
    }
  }
}

/// `{base}_{YYYYMMDD_HHMMSS}.png` 与 `.txt`。
///
/// 精度为秒，同一秒内对同一 key 的两次运行会互相覆盖。
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampedNaming;

impl TimestampedNaming {
  pub fn names_at<Tz>(&self, key: &str, now: &DateTime<Tz>) -> ArtifactNames
  where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
  {
    // 两个文件共用一次取到的时间
    let stem = format!("{}_{}", base_name(key), now.format(TIMESTAMP_FORMAT));
    ArtifactNames {
      image_name: format!("{}.{}", stem, IMAGE_EXTENSION),
      metadata_name: format!("{}.{}", stem, METADATA_EXTENSION),
    }
  }
}

impl OutputNaming for TimestampedNaming {
  fn names(&self, key: &str) -> ArtifactNames {
    self.names_at(key, &Local::now())
  }
}

/// 由调用方选择的命名策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
  #[default]
  Static,
  Timestamped,
}

impl OutputNaming for NamingPolicy {
  fn names(&self, key: &str) -> ArtifactNames {
    match self {
      NamingPolicy::Static => StaticNaming.names(key),
      NamingPolicy::Timestamped => TimestampedNaming.names(key),
    }
  }
}

impl FromStr for NamingPolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "static" => Ok(NamingPolicy::Static),
      "timestamped" | "timestamp" => Ok(NamingPolicy::Timestamped),
      other => Err(format!("未知的命名策略: {}", other)),
    }
  }
}

impl fmt::Display for NamingPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NamingPolicy::Static => write!(f, "static"),
      NamingPolicy::Timestamped => write!(f, "timestamped"),
    }
  }
}
