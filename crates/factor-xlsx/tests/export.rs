//! Serialization smoke tests: the compiled grids survive the trip through
//! the binary container writer.

use std::io::Cursor;

use factor_model::{CompileRequest, LeafNode, WeightModel, WeightNode};
use factor_xlsx::{export_to_vec, export_to_writer};

fn request() -> CompileRequest {
    CompileRequest {
        title: "Vendor Choice".to_string(),
        description: String::new(),
        model: WeightModel::new(vec![
            WeightNode {
                name: "Price".to_string(),
                weight: 60,
                subdivided: true,
                children: vec![
                    LeafNode {
                        name: "License".to_string(),
                        weight: 50,
                        ..Default::default()
                    },
                    LeafNode {
                        name: "Support".to_string(),
                        weight: 50,
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            WeightNode {
                name: "Fit".to_string(),
                weight: 40,
                ..Default::default()
            },
        ]),
        option_count: 3,
        option_names: Vec::new(),
    }
}

#[test]
fn export_produces_a_zip_container() {
    let bytes = export_to_vec(&request()).unwrap();
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[test]
fn export_to_writer_matches_buffer_export() {
    let mut sink = Cursor::new(Vec::new());
    export_to_writer(&request(), &mut sink).unwrap();
    let written = sink.into_inner();
    assert_eq!(&written[..4], b"PK\x03\x04");
    assert!(!written.is_empty());
}

#[test]
fn empty_model_still_exports() {
    let request = CompileRequest {
        model: WeightModel::default(),
        option_count: 2,
        ..Default::default()
    };
    let bytes = export_to_vec(&request).unwrap();
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}
