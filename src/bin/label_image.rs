// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/bin/label_image.rs - 单张图像标注
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

use anyhow::Result;
use clap::Parser;
use url::Url;

use biaoqian::{
  FromUrl,
  input::StorageWrapper,
  model::DetectorWrapper,
  output::{NamingPolicy, Renderer},
  task::Pipeline,
};
use tracing::{info, warn};

/// Biaoqian 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 对象存储，例如 folder:///data/buckets
  #[arg(long, value_name = "STORAGE", default_value = "folder://.")]
  pub storage: Url,
  /// 标签检测服务，例如 labels:///data/responses
  #[arg(long, value_name = "DETECTOR")]
  pub detector: Url,
  /// 存储桶名称
  #[arg(long, value_name = "BUCKET")]
  pub bucket: String,
  /// 对象 key
  #[arg(long, value_name = "KEY")]
  pub key: String,
  /// 输出目录
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub output: PathBuf,
  /// 命名策略: static 或 timestamped
  #[arg(long, value_name = "POLICY", default_value_t = NamingPolicy::Static)]
  pub naming: NamingPolicy,
  /// 标题字体文件，未指定时查找系统字体
  #[arg(long, value_name = "FONT")]
  pub font: Option<PathBuf>,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("对象存储: {}", args.storage);
  info!("检测服务: {}", args.detector);
  info!("输入对象: {}/{}", args.bucket, args.key);
  info!("输出目录: {}", args.output.display());
  info!("命名策略: {}", args.naming);

  let storage = StorageWrapper::from_url(&args.storage)?;
  let detector = DetectorWrapper::from_url(&args.detector)?;
  let renderer = match &args.font {
    Some(path) => Renderer::with_font_file(path)?,
    None => Renderer::with_system_font(),
  };

  let pipeline = Pipeline::new(storage, detector, args.naming)
    .with_renderer(renderer)
    .with_output_dir(&args.output);

  match pipeline.run(&args.bucket, &args.key)? {
    Some(artifacts) => {
      info!("标注图像: {}", artifacts.image_path.display());
      info!("元数据: {}", artifacts.metadata_path.display());
    }
    None => warn!("未生成任何输出"),
  }

  Ok(())
}
