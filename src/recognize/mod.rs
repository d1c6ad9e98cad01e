use async_trait::async_trait;
use anyhow::Result;
use std::path::Path;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::info;

use crate::parsers::extract_query;

/// Image-to-text capability supplied by the host environment. The crate
/// never links an OCR engine itself; recognized text flows through
/// [`extract_query`] to become a search query.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in the image, reporting fractional progress (0..=1)
    /// on the channel as work advances. A dropped receiver must not fail
    /// the recognition.
    async fn recognize(&self, image: &Path, progress: UnboundedSender<f32>) -> Result<String>;
}

/// Recognizer for hosts whose OCR runs out of band: the "image" path
/// points at a file already containing the recognized text.
pub struct PlainTextRecognizer;

#[async_trait]
impl TextRecognizer for PlainTextRecognizer {
    async fn recognize(&self, image: &Path, progress: UnboundedSender<f32>) -> Result<String> {
        let text = tokio::fs::read_to_string(image).await?;
        let _ = progress.send(1.0);
        Ok(text)
    }
}

/// Drive a recognizer over an image and distill the output into a search
/// query. Progress fractions are surfaced through the log as they arrive.
pub async fn query_from_image(recognizer: &dyn TextRecognizer, image: &Path) -> Result<String> {
    let (tx, mut rx) = mpsc::unbounded_channel::<f32>();

    let reporter = tokio::spawn(async move {
        while let Some(fraction) = rx.recv().await {
            info!("Recognizing ({}%)", (fraction * 100.0).round() as u32);
        }
    });

    let text = recognizer.recognize(image, tx).await?;
    let _ = reporter.await;

    Ok(extract_query(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct CannedRecognizer {
        text: &'static str,
    }

    #[async_trait]
    impl TextRecognizer for CannedRecognizer {
        async fn recognize(
            &self,
            _image: &Path,
            progress: UnboundedSender<f32>,
        ) -> Result<String> {
            for step in [0.25, 0.5, 1.0] {
                let _ = progress.send(step);
            }
            Ok(self.text.to_string())
        }
    }

    #[tokio::test]
    async fn recognized_text_becomes_a_query() {
        let recognizer = CannedRecognizer {
            text: "官方旗舰店\n苹果 14 Pro Max 256GB 深空黑色\n",
        };

        let query = query_from_image(&recognizer, &PathBuf::from("receipt.png"))
            .await
            .unwrap();

        assert_eq!(query, "苹果 14 Pro Max 256GB 深空黑色");
    }

    #[tokio::test]
    async fn dropped_progress_receiver_does_not_fail_recognition() {
        let recognizer = CannedRecognizer { text: "ok line here" };
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let text = recognizer
            .recognize(&PathBuf::from("x.png"), tx)
            .await
            .unwrap();
        assert_eq!(text, "ok line here");
    }
}
