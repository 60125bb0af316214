//! Walk and generate benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiln_codegen::{CodeGenerator, ReactGenerator};
use kiln_core::{DesignNode, FileResponse, LayoutMode, NodeType, StaticClient};
use kiln_extract::TreeWalker;
use kiln_pipeline::{Pipeline, PipelineOptions};
use kiln_resolver::RunContext;

/// A canvas of `sections` cards, each with a header, body text and two buttons.
fn dashboard(sections: usize) -> DesignNode {
    let mut canvas = DesignNode::new("0:1", "Dashboard", NodeType::Canvas);
    for i in 0..sections {
        let id = |n: usize| format!("{}:{}", i + 1, n);
        let card = DesignNode::frame(id(0), "Card")
            .with_layout(LayoutMode::Vertical, 16.0)
            .with_child(
                DesignNode::frame(id(1), "Header")
                    .with_child(DesignNode::text(id(2), "Title", format!("Section {}", i)))
                    .with_child(DesignNode::text(id(3), "Subtitle", "Updated today")),
            )
            .with_child(
                DesignNode::frame(id(4), "Content")
                    .with_child(DesignNode::text(id(5), "Body", "Lorem ipsum dolor sit amet")),
            )
            .with_child(
                DesignNode::frame(id(6), "Actions")
                    .with_layout(LayoutMode::Horizontal, 8.0)
                    .with_child(DesignNode::frame(id(7), "Button").with_child(DesignNode::text(id(8), "Label", "Open")))
                    .with_child(DesignNode::frame(id(9), "Button").with_child(DesignNode::text(id(10), "Label", "Share"))),
            );
        canvas = canvas.with_child(card);
    }
    canvas
}

fn walk_and_generate(c: &mut Criterion) {
    let client = StaticClient::new();
    let walker = TreeWalker::standard();
    let generator = ReactGenerator::standard().unwrap();
    let page = dashboard(50);

    c.bench_function("walk_50_cards", |b| {
        b.iter(|| {
            let mut ctx = RunContext::new(&client, "bench");
            walker.walk_all(black_box(&page.children), &mut ctx).unwrap()
        })
    });

    let mut ctx = RunContext::new(&client, "bench");
    let roots = walker.walk_all(&page.children, &mut ctx).unwrap();
    c.bench_function("generate_50_cards", |b| {
        b.iter(|| generator.generate("Dashboard", black_box(&roots)).unwrap())
    });
}

fn render_file(c: &mut Criterion) {
    let document = DesignNode::new("0:0", "Document", NodeType::Document).with_child(dashboard(20));
    let client = StaticClient::new().with_file(
        "bench",
        FileResponse {
            name: "Bench".into(),
            document,
            ..Default::default()
        },
    );
    let pipeline = Pipeline::new(&client, &kiln_core::LocalFileSystem, PipelineOptions::new()).unwrap();

    c.bench_function("render_file_20_cards", |b| {
        b.iter(|| pipeline.render_file(black_box("bench")).unwrap())
    });
}

criterion_group!(benches, walk_and_generate, render_file);
criterion_main!(benches);
