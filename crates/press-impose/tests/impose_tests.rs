use lopdf::{Dictionary, Document, Object, Stream};
use press_core::catalog::{Orientation, PressSheet};
use press_impose::*;

/// Build an in-memory PDF with `num_pages` pages of the given size.
fn create_test_pdf(num_pages: usize, width_pt: f64, height_pt: f64) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width_pt as f32),
                    Object::Real(height_pt as f32),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);
    doc
}

fn run(
    doc: Document,
    spec: &ImpositionSpec,
    policy: &ChunkPolicy,
) -> press_core::Result<ImposeOutput> {
    let mut surface = LopdfSurface::new(doc);
    impose_with_surface(
        &mut surface,
        spec,
        &JobSlug::default(),
        policy,
        &CancelToken::new(),
        &NullProgress,
    )
}

fn output_page_count(chunk: &ChunkOutput) -> usize {
    Document::load_mem(&chunk.bytes).unwrap().get_pages().len()
}

#[test]
fn stack_two_by_two_simplex() {
    // Scenario A geometry: 8 half-letter pages, 2x2, 11x17 landscape.
    let doc = create_test_pdf(8, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: false,
        ..Default::default()
    };
    let output = run(doc, &spec, &ChunkPolicy::default()).unwrap();

    assert_eq!(output.report.total_sheets, 2);
    assert_eq!(output.report.orientation, Orientation::Landscape);
    assert_eq!(output.chunks.len(), 1);
    // Simplex: one output page per sheet.
    assert_eq!(output_page_count(&output.chunks[0]), 2);
}

#[test]
fn stack_duplex_doubles_output_pages() {
    let doc = create_test_pdf(16, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: true,
        ..Default::default()
    };
    let output = run(doc, &spec, &ChunkPolicy::default()).unwrap();
    assert_eq!(output.report.total_sheets, 2);
    assert_eq!(output_page_count(&output.chunks[0]), 4);
}

#[test]
fn booklet_sixteen_pages_renders_four_sheets() {
    // Scenario B geometry: 16 letter pages as 2-up spreads on 11x17.
    let doc = create_test_pdf(16, 8.5 * 72.0, 11.0 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        kind: ImpositionKind::Booklet,
        bleed_in: 0.0,
        creep_in: 0.0,
        ..Default::default()
    };
    let output = run(doc, &spec, &ChunkPolicy::default()).unwrap();
    assert_eq!(output.report.total_sheets, 4);
    assert_eq!(output.report.slots_per_sheet, 2);
    assert!(output.report.duplex);
    assert_eq!(output_page_count(&output.chunks[0]), 8);
}

#[test]
fn repeat_mode_with_marks_and_slug() {
    let doc = create_test_pdf(3, 4.0 * 72.0, 6.0 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::TwelveByEighteen,
        kind: ImpositionKind::Repeat,
        columns: 3,
        rows: 2,
        bleed_in: 0.125,
        duplex: false,
        include_slug: true,
        ..Default::default()
    };
    let slug = JobSlug {
        job_id: "J-77".to_string(),
        customer: "Acme".to_string(),
        file_name: "cards.pdf".to_string(),
        quantity: 500,
        trim_width_in: 3.75,
        trim_height_in: 5.75,
        ..Default::default()
    };
    let mut surface = LopdfSurface::new(doc);
    let output = impose_with_surface(
        &mut surface,
        &spec,
        &slug,
        &ChunkPolicy::default(),
        &CancelToken::new(),
        &NullProgress,
    )
    .unwrap();
    // One sheet per master page.
    assert_eq!(output.report.total_sheets, 3);
    assert_eq!(output_page_count(&output.chunks[0]), 3);
}

#[test]
fn first_sheet_slip_renders() {
    let doc = create_test_pdf(8, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: true,
        first_sheet_slip_color: SlipColor::Yellow,
        ..Default::default()
    };
    let output = run(doc, &spec, &ChunkPolicy::default()).unwrap();
    // The slip replaces content on sheet 1 front; page counts are
    // unchanged.
    assert_eq!(output_page_count(&output.chunks[0]), 2);
}

#[test]
fn layout_too_big_fails_before_rendering() {
    let doc = create_test_pdf(4, 8.5 * 72.0, 11.0 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Letter,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        ..Default::default()
    };
    let err = run(doc, &spec, &ChunkPolicy::default()).unwrap_err();
    assert!(matches!(err, PressError::LayoutExceedsSheet(_)));
}

#[test]
fn cancellation_before_start() {
    let doc = create_test_pdf(8, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        ..Default::default()
    };
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut surface = LopdfSurface::new(doc);
    let err = impose_with_surface(
        &mut surface,
        &spec,
        &JobSlug::default(),
        &ChunkPolicy::default(),
        &cancel,
        &NullProgress,
    )
    .unwrap_err();
    assert!(matches!(err, PressError::Cancelled));
}

#[test]
fn chunked_output_parts_are_tagged() {
    let doc = create_test_pdf(60, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: false,
        ..Default::default()
    };
    // The size estimate trips, but 15 simplex sheets stay under the
    // 100-output-page ceiling, so the job still fits one part.
    let policy = ChunkPolicy {
        input_bytes: 2_000_000_000,
        limit_bytes: 1_900_000_000,
    };
    let output = run(doc, &spec, &policy).unwrap();
    assert_eq!(output.chunks.len(), 1);
    assert_eq!(output.chunks[0].total_parts, 1);
}

#[test]
fn repeat_chunking_splits_sheets() {
    let doc = create_test_pdf(130, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        kind: ImpositionKind::Repeat,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: false,
        include_slug: false,
        ..Default::default()
    };
    let policy = ChunkPolicy {
        input_bytes: 600_000_000,
        limit_bytes: 1_900_000_000,
    };
    let output = run(doc, &spec, &policy).unwrap();
    // 130 masters = 130 sheets at 50 output pages per repeat chunk.
    assert_eq!(output.chunks.len(), 3);
    assert_eq!(output_page_count(&output.chunks[0]), 50);
    assert_eq!(output_page_count(&output.chunks[2]), 30);
    assert!(output
        .chunks
        .iter()
        .enumerate()
        .all(|(i, c)| c.part_index == i && c.total_parts == 3));
}

#[test]
fn cancellation_mid_run_keeps_finished_chunks() {
    use std::sync::Mutex;

    struct CancelAfterFirstChunk {
        cancel: CancelToken,
        delivered: Mutex<Vec<Vec<u8>>>,
    }
    impl ProgressSink for CancelAfterFirstChunk {
        fn sheet_done(&self, _c: usize, _s: usize, _t: usize) {}
        fn chunk_done(&self, _part: usize, _total: usize, bytes: &[u8]) {
            self.delivered.lock().unwrap().push(bytes.to_vec());
            self.cancel.cancel();
        }
    }

    let doc = create_test_pdf(130, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        kind: ImpositionKind::Repeat,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: false,
        include_slug: false,
        ..Default::default()
    };
    let policy = ChunkPolicy {
        input_bytes: 600_000_000,
        limit_bytes: 1_900_000_000,
    };
    let cancel = CancelToken::new();
    let sink = CancelAfterFirstChunk {
        cancel: cancel.clone(),
        delivered: Mutex::new(Vec::new()),
    };

    let mut surface = LopdfSurface::new(doc);
    let err = impose_with_surface(
        &mut surface,
        &spec,
        &JobSlug::default(),
        &policy,
        &cancel,
        &sink,
    )
    .unwrap_err();
    assert!(matches!(err, PressError::Cancelled));

    // The chunk serialized before cancellation stays with the caller.
    let delivered = sink.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(
        Document::load_mem(&delivered[0]).unwrap().get_pages().len(),
        50
    );
}

#[test]
fn progress_reports_every_sheet() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let doc = create_test_pdf(24, 8.5 * 72.0, 5.5 * 72.0);
    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: true,
        ..Default::default()
    };
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let sink = FnProgress(move |_chunk, _sheet, total| {
        assert_eq!(total, 3);
        seen.fetch_add(1, Ordering::Relaxed);
    });

    let mut surface = LopdfSurface::new(doc);
    impose_with_surface(
        &mut surface,
        &spec,
        &JobSlug::default(),
        &ChunkPolicy::default(),
        &CancelToken::new(),
        &sink,
    )
    .unwrap();
    assert_eq!(count.load(Ordering::Relaxed), 3);
}

#[tokio::test]
async fn impose_file_round_trip() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.pdf");

    let mut doc = create_test_pdf(8, 8.5 * 72.0, 5.5 * 72.0);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    std::fs::write(&input, bytes).unwrap();

    let spec = ImpositionSpec {
        selected_sheet: PressSheet::Tabloid,
        columns: 2,
        rows: 2,
        bleed_in: 0.0,
        duplex: false,
        ..Default::default()
    };
    let output = impose_file(&input, &spec, &JobSlug::default(), &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(output.report.total_sheets, 2);
    let name = chunk_file_name("input_imposed", 0, output.report.total_parts);
    assert_eq!(name, "input_imposed.pdf");
    std::fs::write(dir.path().join(name), &output.chunks[0].bytes).unwrap();
}
