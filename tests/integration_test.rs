use html2pdf_batch::utils::logging;
use html2pdf_batch::{convert_html_file_to_pdf, App, Config, ErrorCategory, RenderOptions};
use tempfile::TempDir;

fn test_config(tmp: &TempDir) -> Config {
    Config {
        input_dir: tmp.path().join("HTML_Templates"),
        output_dir: tmp.path().join("PDF_Output"),
        output_log_file: tmp
            .path()
            .join("conversion_failures.txt")
            .to_string_lossy()
            .into_owned(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_missing_source_is_not_found() {
    let tmp = TempDir::new().unwrap();

    let err = convert_html_file_to_pdf(
        tmp.path().join("missing.html"),
        tmp.path().join("out"),
        None,
        RenderOptions::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(!tmp.path().join("out").join("output.pdf").exists());
}

#[tokio::test]
async fn test_app_with_empty_input_dir() {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);
    std::fs::create_dir(&config.input_dir).unwrap();
    std::fs::write(config.input_dir.join("readme.txt"), "not html").unwrap();

    let report = App::initialize(config.clone())
        .await
        .expect("初始化失败")
        .run()
        .await
        .expect("运行失败");

    assert_eq!(report.total(), 0);
    assert!(report.is_success());
    assert!(config.output_dir.is_dir());
    assert!(std::path::Path::new(&config.output_log_file).is_file());
}

#[tokio::test]
async fn test_app_rejects_missing_input_dir() {
    let tmp = TempDir::new().unwrap();
    let app = App::initialize(test_config(&tmp)).await.expect("初始化失败");
    assert!(app.run().await.is_err());
}

#[tokio::test]
async fn test_app_rejects_invalid_render_options_file() {
    let tmp = TempDir::new().unwrap();
    let options_file = tmp.path().join("render.toml");
    std::fs::write(&options_file, "[render]\nformat = \"Z9\"\n").unwrap();

    let config = Config {
        render_options_file: Some(options_file),
        ..test_config(&tmp)
    };
    assert!(App::initialize(config).await.is_err());
}

#[tokio::test]
#[ignore] // 需要本机安装 Chromium：cargo test -- --ignored
async fn test_convert_with_real_browser() {
    logging::init(true);

    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("leaflet.html");
    std::fs::write(&tmp.path().join("style.css"), "h1 { color: #336699; }").unwrap();
    std::fs::write(
        &source,
        r#"<!doctype html>
<html>
  <head><link rel="stylesheet" href="style.css"></head>
  <body><h1>Leaflet</h1><p>Hello PDF</p></body>
</html>"#,
    )
    .unwrap();

    let out = tmp.path().join("out").join("nested");
    let path = convert_html_file_to_pdf(&source, &out, Some("leaflet.pdf"), RenderOptions::default())
        .await
        .expect("转换失败");

    assert_eq!(path, std::fs::canonicalize(&out).unwrap().join("leaflet.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    // 再次转换覆盖旧文件
    convert_html_file_to_pdf(&source, &out, Some("leaflet.pdf"), RenderOptions::default())
        .await
        .expect("第二次转换失败");
    let names: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(names.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_batch_with_real_browser() {
    logging::init(true);

    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);
    std::fs::create_dir(&config.input_dir).unwrap();
    for name in ["a.html", "b.html"] {
        std::fs::write(config.input_dir.join(name), format!("<h1>{name}</h1>")).unwrap();
    }
    std::fs::write(config.input_dir.join("c.HTML"), "<h1>skip</h1>").unwrap();

    let report = App::initialize(config.clone())
        .await
        .expect("初始化失败")
        .run()
        .await
        .expect("运行失败");

    assert_eq!(report.converted_count(), 2);
    assert!(config.output_dir.join("a.pdf").is_file());
    assert!(config.output_dir.join("b.pdf").is_file());
    assert!(!config.output_dir.join("c.pdf").exists());
}
