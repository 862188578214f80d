mod settings;

pub use settings::{HistoryConfig, ServerConfig, Settings, TransportConfig};
