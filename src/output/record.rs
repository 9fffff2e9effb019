// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/output/record.rs - 标注元数据记录
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

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;
use tracing::info;

use crate::label::AnnotatedRegion;

const INDENT: &[u8] = b"    ";

#[derive(Error, Debug)]
pub enum RecordError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBoxRecord {
  pub left: f64,
  pub top: f64,
  pub width: f64,
  pub height: f64,
}

/// 元数据文档中的一条记录，边界框为百分比坐标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataRecord {
  pub name: String,
  pub confidence: f64,
  pub bounding_box: BoundingBoxRecord,
}

impl From<&AnnotatedRegion> for MetadataRecord {
  fn from(region: &AnnotatedRegion) -> Self {
    let b = &region.percent_box;
    MetadataRecord {
      name: region.name.clone(),
      confidence: region.confidence,
      bounding_box: BoundingBoxRecord {
        left: b.left,
        top: b.top,
        width: b.width,
        height: b.height,
      },
    }
  }
}

pub fn serialize(regions: &[AnnotatedRegion]) -> Vec<MetadataRecord> {
  regions.iter().map(MetadataRecord::from).collect()
}

/// 以四空格缩进编码文档
pub fn to_pretty_json(document: &[MetadataRecord]) -> Result<Vec<u8>, RecordError> {
  let mut buffer = Vec::new();
  let formatter = PrettyFormatter::with_indent(INDENT);
  let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
  document.serialize(&mut serializer)?;
  Ok(buffer)
}

/// 整体重写文档，不与旧内容合并
pub fn write(document: &[MetadataRecord], path: &Path) -> Result<(), RecordError> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)?;
  }

  std::fs::write(path, to_pretty_json(document)?)?;
  info!("元数据已保存: {} ({} 条)", path.display(), document.len());
  Ok(())
}

pub fn read(path: &Path) -> Result<Vec<MetadataRecord>, RecordError> {
  let data = std::fs::read(path)?;
  Ok(serde_json::from_slice(&data)?)
}
