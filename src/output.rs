// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/output.rs - 输出定义
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

use std::path::{Path, PathBuf};

pub mod draw;
pub mod naming;
pub mod record;

pub use self::draw::{RenderError, Renderer};
pub use self::naming::{
  ArtifactNames, NamingPolicy, OutputNaming, StaticNaming, TimestampedNaming, base_name,
};
pub use self::record::{MetadataRecord, RecordError};

/// 同一输入对应的两个输出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifacts {
  pub image_path: PathBuf,
  pub metadata_path: PathBuf,
}

impl OutputArtifacts {
  pub fn in_directory(directory: &Path, names: ArtifactNames) -> Self {
    Self {
      image_path: directory.join(names.image_name),
      metadata_path: directory.join(names.metadata_name),
    }
  }
}
