// 🧾 Receipt OCR - placeholder
//
// No recognition happens yet. Every upload gets the same sample receipt back.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptItem {
    pub name: String,
    pub price: f64,
}

/// Fields extracted from a receipt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptData {
    pub merchant: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub items: Vec<ReceiptItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrResponse {
    pub message: String,
    pub status: String,
    pub data: ReceiptData,
}

/// Sample result returned for any receipt
pub fn process_receipt(now: DateTime<Utc>) -> OcrResponse {
    OcrResponse {
        message: "Receipt processing endpoint".to_string(),
        status: "OCR processing will be implemented with Mistral AI".to_string(),
        data: ReceiptData {
            merchant: "Sample Store".to_string(),
            amount: 29.99,
            date: now,
            items: vec![
                ReceiptItem {
                    name: "Item 1".to_string(),
                    price: 15.99,
                },
                ReceiptItem {
                    name: "Item 2".to_string(),
                    price: 14.00,
                },
            ],
        },
    }
}
