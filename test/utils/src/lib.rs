use std::io::Cursor;

use image::DynamicImage;
use image::ImageOutputFormat;
use image::Rgba;
use image::RgbaImage;

pub fn description_fixture() -> &'static str {
    return r#"
1. Set of 4 matching white ceramic dinner plates, lightly used
2. Nike Air Max sneakers, men's size 10, gently used

- Vintage brass desk lamp with green glass shade
"#
    .trim();
}

pub fn listing_fixture() -> &'static str {
    return r#"
Here are your listings, researched against recent marketplace sales.

| Item | Title | Description | Suggested Price | Selling Points |
|------|-------|-------------|-----------------|----------------|
| Dinner plates | Classic White Dinnerware Set | Four crisp white plates, ready for your next dinner party. | $25 | Dishwasher safe, timeless |
| Sneakers | Nike Air Max, Size 10 | Iconic cushioning, lightly worn and freshly cleaned. | $60 | Authentic, comfortable |

Let me know if you would like a different tone.
"#
    .trim();
}

/// Body of a non-streaming chat completion returning `content`.
pub fn completion_body(content: &str) -> String {
    return serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string();
}

pub fn models_body(ids: &[&str]) -> String {
    let data = ids
        .iter()
        .map(|id| {
            return serde_json::json!({ "id": id, "object": "model" });
        })
        .collect::<Vec<serde_json::Value>>();

    return serde_json::json!({ "object": "list", "data": data }).to_string();
}

/// A tiny transparent PNG, which must be flattened before JPEG encoding.
pub fn png_fixture() -> Vec<u8> {
    let img = RgbaImage::from_pixel(4, 4, Rgba([200, 40, 40, 128]));
    let mut bytes = Cursor::new(vec![]);
    DynamicImage::ImageRgba8(img)
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .unwrap();

    return bytes.into_inner();
}
