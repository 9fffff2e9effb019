// 该文件是 Biaoqian （标签标注） 项目的一部分。
// tests/pipeline.rs - 流水线端到端测试
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

use biaoqian::{
  input::FolderStorage,
  label::DetectedLabel,
  model::{LabelDetector, ResponseFileDetector},
  output::{NamingPolicy, Renderer, StaticNaming, TimestampedNaming, record},
  task::Pipeline,
};
use image::{Rgb, RgbImage};

const GRAY: Rgb<u8> = Rgb([100, 100, 100]);

const RESPONSE: &str = r#"{
  "Labels": [
    {"Name": "Dog", "Confidence": 97.5, "Instances": [
      {"BoundingBox": {"Left": 0.25, "Top": 0.5, "Width": 0.5, "Height": 0.25}},
      {"BoundingBox": {"Left": 0.0, "Top": 0.0, "Width": 0.125, "Height": 0.125}}
    ]},
    {"Name": "Animal", "Confidence": 97.5, "Instances": []},
    {"Name": "Cat", "Confidence": 12.0, "Instances": [
      {"BoundingBox": {"Left": 0.5, "Top": 0.5, "Width": 0.1, "Height": 0.1}}
    ]}
  ]
}"#;

struct BrokenDetector;

impl LabelDetector for BrokenDetector {
  type Error = std::io::Error;

  fn request_labels(
    &self,
    _bucket: &str,
    _key: &str,
    _min_confidence: f64,
    _max_labels: usize,
  ) -> Result<Vec<DetectedLabel>, Self::Error> {
    Err(std::io::Error::other("connection reset"))
  }
}

fn setup(root: &Path) {
  let bucket = root.join("storage/photos");
  std::fs::create_dir_all(&bucket).expect("create bucket");
  RgbImage::from_pixel(80, 60, GRAY)
    .save(bucket.join("photo.png"))
    .expect("write image");

  let responses = root.join("responses/photos");
  std::fs::create_dir_all(&responses).expect("create responses");
  std::fs::write(responses.join("photo.png.json"), RESPONSE).expect("write response");
}

fn file_count(dir: &Path) -> usize {
  std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[test]
fn static_run_writes_both_artifacts() {
  let temp = tempfile::tempdir().expect("create temp dir");
  setup(temp.path());
  let out = temp.path().join("out");

  let pipeline = Pipeline::new(
    FolderStorage::new(temp.path().join("storage")),
    ResponseFileDetector::new(temp.path().join("responses")),
    StaticNaming,
  )
  .with_renderer(Renderer::new(None))
  .with_output_dir(&out);

  let artifacts = pipeline
    .run("photos", "photo.png")
    .expect("run")
    .expect("artifacts");

  assert_eq!(artifacts.image_path, out.join("labeled_photo.png"));
  assert_eq!(artifacts.metadata_path, out.join("photo_metadata.txt"));

  let image = image::open(&artifacts.image_path).expect("open").to_rgb8();
  assert_eq!(image.dimensions(), (80, 60));
  // Dog 第一个实例的左边框 x = 20, y ∈ [30, 45)
  assert_eq!(image.get_pixel(20, 40), &Rgb([255, 0, 0]));

  let document = record::read(&artifacts.metadata_path).expect("read metadata");
  assert_eq!(document.len(), 2);
  assert!(document.iter().all(|r| r.name == "Dog"));
  assert_eq!(document[0].confidence, 97.5);
  assert_eq!(document[0].bounding_box.left, 25.0);
  assert_eq!(document[0].bounding_box.top, 50.0);
  assert_eq!(document[1].bounding_box.width, 12.5);
}

#[test]
fn default_renderer_draws_caption_background_only() {
  let temp = tempfile::tempdir().expect("create temp dir");
  setup(temp.path());
  let out = temp.path().join("out");

  let pipeline = Pipeline::new(
    FolderStorage::new(temp.path().join("storage")),
    ResponseFileDetector::new(temp.path().join("responses")),
    StaticNaming,
  )
  .with_output_dir(&out);

  let artifacts = pipeline.run("photos", "photo.png").expect("run").expect("artifacts");
  let image = image::open(&artifacts.image_path).expect("open").to_rgb8();
  // Dog 第一个实例框顶 y = 30，标题背景占 y ∈ [10, 28)，不含文字
  for x in 22..40 {
    for y in 10..28 {
      assert_eq!(image.get_pixel(x, y), &Rgb([178, 178, 178]));
    }
  }
}

#[test]
fn missing_image_produces_nothing() {
  let temp = tempfile::tempdir().expect("create temp dir");
  setup(temp.path());
  let out = temp.path().join("out");

  let pipeline = Pipeline::new(
    FolderStorage::new(temp.path().join("storage")),
    ResponseFileDetector::new(temp.path().join("responses")),
    StaticNaming,
  )
  .with_output_dir(&out);

  let result = pipeline.run("photos", "absent.png").expect("run");
  assert!(result.is_none());
  assert_eq!(file_count(&out), 0);
}

#[test]
fn detection_failure_yields_plain_image_and_empty_document() {
  let temp = tempfile::tempdir().expect("create temp dir");
  setup(temp.path());
  let out = temp.path().join("out");

  let pipeline = Pipeline::new(
    FolderStorage::new(temp.path().join("storage")),
    BrokenDetector,
    StaticNaming,
  )
  .with_output_dir(&out);

  let artifacts = pipeline
    .run("photos", "photo.png")
    .expect("run")
    .expect("artifacts");

  let image = image::open(&artifacts.image_path).expect("open").to_rgb8();
  assert_eq!(image, RgbImage::from_pixel(80, 60, GRAY));

  let text = std::fs::read_to_string(&artifacts.metadata_path).expect("read metadata");
  assert_eq!(text, "[]");
}

#[test]
fn static_rerun_is_byte_identical() {
  let temp = tempfile::tempdir().expect("create temp dir");
  setup(temp.path());
  let out = temp.path().join("out");

  let pipeline = Pipeline::new(
    FolderStorage::new(temp.path().join("storage")),
    ResponseFileDetector::new(temp.path().join("responses")),
    NamingPolicy::Static,
  )
  .with_output_dir(&out);

  let first = pipeline.run("photos", "photo.png").expect("run").expect("artifacts");
  let first_metadata = std::fs::read(&first.metadata_path).expect("read");
  let second = pipeline.run("photos", "photo.png").expect("run").expect("artifacts");
  let second_metadata = std::fs::read(&second.metadata_path).expect("read");

  assert_eq!(first, second);
  assert_eq!(first_metadata, second_metadata);
  assert_eq!(file_count(&out), 2);
}

#[test]
fn timestamped_run_uses_shared_stem() {
  let temp = tempfile::tempdir().expect("create temp dir");
  setup(temp.path());
  let out = temp.path().join("out");

  let pipeline = Pipeline::new(
    FolderStorage::new(temp.path().join("storage")),
    ResponseFileDetector::new(temp.path().join("responses")),
    TimestampedNaming,
  )
  .with_output_dir(&out);

  let artifacts = pipeline.run("photos", "photo.png").expect("run").expect("artifacts");
  let image_stem = artifacts.image_path.file_stem().unwrap().to_owned();
  let metadata_stem = artifacts.metadata_path.file_stem().unwrap().to_owned();
  assert_eq!(image_stem, metadata_stem);
  assert_eq!(artifacts.image_path.extension().unwrap(), "png");
  assert_eq!(artifacts.metadata_path.extension().unwrap(), "txt");
  assert!(artifacts.image_path.exists());
  assert!(artifacts.metadata_path.exists());
}

#[test]
fn unwritable_output_is_an_error() {
  let temp = tempfile::tempdir().expect("create temp dir");
  setup(temp.path());
  // 输出目录被同名文件占用
  let out = temp.path().join("blocked");
  std::fs::write(&out, b"").expect("create blocker");

  let pipeline = Pipeline::new(
    FolderStorage::new(temp.path().join("storage")),
    ResponseFileDetector::new(temp.path().join("responses")),
    StaticNaming,
  )
  .with_output_dir(&out);

  assert!(pipeline.run("photos", "photo.png").is_err());
}
