// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/task.rs - 标注流水线
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

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
  input::ImageSource,
  label::flatten,
  model::LabelDetector,
  output::{OutputArtifacts, OutputNaming, RecordError, RenderError, Renderer, record},
};

#[derive(Error, Debug)]
pub enum PipelineError {
  #[error("渲染错误: {0}")]
  RenderError(#[from] RenderError),
  #[error("元数据记录错误: {0}")]
  RecordError(#[from] RecordError),
}

/// 单张图像的标注流水线：取图、检测、展开、绘制、记录，依次同步执行
pub struct Pipeline<S, D, N> {
  source: S,
  detector: D,
  naming: N,
  renderer: Renderer,
  output_dir: PathBuf,
}

impl<S, D, N> Pipeline<S, D, N>
where
  S: ImageSource,
  D: LabelDetector,
  N: OutputNaming,
{
  /// 默认渲染器不带字体，需要标题文字时用 [`Pipeline::with_renderer`] 指定
  pub fn new(source: S, detector: D, naming: N) -> Self {
    Self {
      source,
      detector,
      naming,
      renderer: Renderer::default(),
      output_dir: PathBuf::from("."),
    }
  }

  pub fn with_renderer(mut self, renderer: Renderer) -> Self {
    self.renderer = renderer;
    self
  }

  pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
    self.output_dir = output_dir.into();
    self
  }

  /// 处理一张图像。
  ///
  /// 图像获取失败时返回 `Ok(None)`，不产生任何文件；检测失败时继续输出
  /// 未标注的图像与空元数据；写文件失败则返回错误。
  pub fn run(&self, bucket: &str, key: &str) -> Result<Option<OutputArtifacts>, PipelineError> {
    info!("开始处理: {}/{}", bucket, key);

    let Some(image) = self.source.fetch_image(bucket, key) else {
      warn!("图像不可用，跳过 {}/{}", bucket, key);
      return Ok(None);
    };
    let (width, height) = image.dimensions();
    info!("图像尺寸: {}x{}", width, height);

    let labels = self.detector.detect_labels(bucket, key);
    let regions = flatten(&labels, width, height);
    info!("{} 个标签，{} 个标注区域", labels.len(), regions.len());

    let artifacts = OutputArtifacts::in_directory(&self.output_dir, self.naming.names(key));

    let rendered = self.renderer.render(&image, &regions);
    self.renderer.save(&rendered, &artifacts.image_path)?;

    record::write(&record::serialize(&regions), &artifacts.metadata_path)?;

    info!("处理完成: {}/{}", bucket, key);
    Ok(Some(artifacts))
  }
}
