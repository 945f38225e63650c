use anyhow::Result;
use test_utils::png_fixture;

use super::ImageUpload;

#[tokio::test]
async fn it_reads_a_png_upload() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("Garage Sale.PNG");
    std::fs::write(&file_path, png_fixture())?;

    let upload = ImageUpload::from_path(&file_path).await?;
    assert_eq!(upload.file_name, "Garage Sale.PNG");
    assert_eq!(upload.bytes, png_fixture());

    return Ok(());
}

#[tokio::test]
async fn it_rejects_unsupported_extensions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("items.gif");
    std::fs::write(&file_path, b"GIF89a")?;

    let res = ImageUpload::from_path(&file_path).await;
    assert!(res.is_err());
    assert!(res.unwrap_err().to_string().contains("jpg, jpeg, png"));

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_missing_file() {
    let res = ImageUpload::from_path(std::path::Path::new("./does-not-exist.jpg")).await;
    assert!(res.is_err());
}

#[test]
fn it_hides_bytes_in_debug_output() {
    let upload = ImageUpload {
        file_name: "mug.jpg".to_string(),
        bytes: vec![1, 2, 3],
    };

    insta::assert_snapshot!(format!("{upload:?}"), @r###"ImageUpload { file_name: "mug.jpg", bytes: 3 }"###);
}
