//! Benchmarks for schema conversion
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gbqschema_converter::{ConversionConfig, JsonSchemaExporter, JsonSchemaImporter};
use serde_json::{Map, Value, json};

/// Flat JSON Schema with `column_count` properties cycling through the primitive types
fn generate_schema_with_columns(column_count: usize) -> Value {
    let kinds = [
        json!({"type": "integer"}),
        json!({"type": "number"}),
        json!({"type": "boolean"}),
        json!({"type": "string", "description": "free text"}),
        json!({"type": "string", "format": "date"}),
        json!({"type": "string", "format": "date-time"}),
    ];

    let mut properties = Map::new();
    let mut required = Vec::new();
    for i in 0..column_count {
        let name = format!("col_{}", i);
        if i % 3 == 0 {
            required.push(Value::String(name.clone()));
        }
        properties.insert(name, kinds[i % kinds.len()].clone());
    }

    json!({"properties": properties, "required": required})
}

/// Schema nesting `depth` records, each referencing a shared definition
fn generate_nested_schema(depth: usize) -> Value {
    let mut node = json!({"type": "object", "properties": {"leaf": {"$ref": "#/definitions/Point"}}});
    for level in 0..depth {
        node = json!({
            "type": "object",
            "properties": {
                (format!("level_{}", level)): node,
                "id": {"type": "integer"}
            },
            "required": ["id"]
        });
    }

    json!({
        "properties": {"root": node},
        "definitions": {
            "Point": {"type": "object", "properties": {"x": {"type": "number"}, "y": {"type": "number"}}}
        }
    })
}

fn bench_json_to_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_to_columns");
    let config = ConversionConfig::builder().validate_meta_schema(false).build();

    for column_count in [10, 50, 100, 200].iter() {
        let schema = generate_schema_with_columns(*column_count);
        group.throughput(Throughput::Elements(*column_count as u64));

        group.bench_with_input(
            BenchmarkId::new("flat", column_count),
            &schema,
            |b, schema| {
                let importer = JsonSchemaImporter::with_config(config.clone());
                b.iter(|| black_box(importer.import(schema)));
            },
        );
    }

    let nested = generate_nested_schema(16);
    group.bench_function("nested_16", |b| {
        let importer = JsonSchemaImporter::with_config(config.clone());
        b.iter(|| black_box(importer.import(&nested)));
    });

    group.finish();
}

fn bench_columns_to_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("columns_to_json");

    for column_count in [10, 50, 100, 200].iter() {
        let columns = JsonSchemaImporter::new()
            .import(&generate_schema_with_columns(*column_count))
            .expect("benchmark schema converts");
        group.throughput(Throughput::Elements(*column_count as u64));

        group.bench_with_input(
            BenchmarkId::new("flat", column_count),
            &columns,
            |b, columns| {
                let exporter = JsonSchemaExporter::new();
                b.iter(|| black_box(exporter.export(columns)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_json_to_columns, bench_columns_to_json);
criterion_main!(benches);
