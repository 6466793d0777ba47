//! Test utilities for the catalogue crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

pub mod logs {
    //! Capture `tracing` output as JSON lines.

    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    use tracing::Level;
    use tracing::subscriber::DefaultGuard;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// JSON log capture installed as the thread's default subscriber.
    ///
    /// Capture ends when the value is dropped. Use with current-thread
    /// runtimes (`#[tokio::test]`, `#[actix_web::test]`) so every event is
    /// emitted on the capturing thread.
    pub struct CapturedLogs {
        buffer: SharedBuffer,
        _guard: DefaultGuard,
    }

    impl CapturedLogs {
        /// Start capturing `INFO` and above.
        pub fn install() -> Self {
            let buffer = SharedBuffer::default();
            let writer = buffer.clone();
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_max_level(Level::INFO)
                .with_writer(move || writer.clone())
                .finish();
            let guard = tracing::subscriber::set_default(subscriber);
            Self {
                buffer,
                _guard: guard,
            }
        }

        /// Captured events, one JSON document per entry.
        pub fn lines(&self) -> Vec<String> {
            let bytes = self
                .buffer
                .0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_owned)
                .collect()
        }
    }
}

pub mod fixtures {
    //! Sample catalogue content.

    use crate::domain::Sock;

    /// Build a sock with the given id and tags and deterministic other fields.
    pub fn sock(id: &str, tags: &[&str]) -> Sock {
        Sock {
            id: id.to_owned(),
            name: format!("sock {id}"),
            description: format!("description of sock {id}"),
            image_url: vec![format!("/catalogue/images/{id}.jpg")],
            price: 10.0,
            count: 1,
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        }
    }

    /// Two-item catalogue: `1` tagged red and warm, `2` tagged blue.
    pub fn red_and_blue() -> Vec<Sock> {
        vec![sock("1", &["red", "warm"]), sock("2", &["blue"])]
    }

    /// Catalogue with varied names, prices and overlapping tags.
    pub fn assorted() -> Vec<Sock> {
        let specs: [(&str, &str, f32, &[&str]); 8] = [
            ("a1", "Holy", 99.99, &["action", "blue"]),
            ("b2", "Crossed", 17.32, &["action", "blue", "red"]),
            ("c3", "Figueroa", 14.0, &["formal", "green"]),
            ("d4", "Nerd leg", 7.99, &["geek", "blue"]),
            ("e5", "Classic", 12.0, &["brown", "red"]),
            ("f6", "Cat socks", 15.0, &["brown", "formal"]),
            ("g7", "SuperSport XL", 15.0, &["sport", "formal", "black"]),
            ("h8", "Colourful", 18.0, &["brown", "blue"]),
        ];
        specs
            .iter()
            .map(|(id, name, price, tags)| Sock {
                name: (*name).to_owned(),
                price: *price,
                ..sock(id, tags)
            })
            .collect()
    }
}
