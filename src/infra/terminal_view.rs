use crate::app::ports::GalleryViewPort;
use crate::domain::PhotoRecord;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

/// Renders the gallery as plain text on a writer (stdout by default)
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Terminal output is best-effort; a closed pipe shouldn't abort navigation
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }
}

#[async_trait]
impl<W: Write + Send + 'static> GalleryViewPort for TerminalView<W> {
    async fn show_cover(&self, photo: &PhotoRecord) {
        self.line(&format!("[cover] {}  {}", photo.title, photo.display_url()));
    }

    async fn show_cover_failed(&self, message: &str) {
        self.line(&format!("[cover] {}", message));
    }

    async fn show_photo(&self, photo: &PhotoRecord) {
        self.line(&format!("[lightbox] {}  {}", photo.title, photo.display_url()));
    }

    async fn show_unavailable(&self, image_url: &str, title: &str) {
        self.line(&format!("[lightbox] {}  {}", title, image_url));
    }

    async fn set_lightbox_visible(&self, visible: bool) {
        self.line(if visible { "[lightbox] opened" } else { "[lightbox] closed" });
    }

    async fn show_error(&self, message: &str) {
        self.line(&format!("[error] {}", message));
    }
}
