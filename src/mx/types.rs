#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MxStatus {
    Records(Vec<MxRecord>),
    NoRecords,
}

impl MxStatus {
    pub fn records(&self) -> &[MxRecord] {
        match self {
            Self::Records(records) => records.as_slice(),
            Self::NoRecords => &[],
        }
    }

    /// Exchange hostnames in probing order.
    pub fn exchanges(&self) -> Vec<&str> {
        self.records()
            .iter()
            .map(|record| record.exchange.as_str())
            .collect()
    }
}
