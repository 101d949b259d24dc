//! Walk through a small two-hole course: resolve holes, move a green in the
//! editor and classify a few lies.
//!
//! Run with `cargo run --example hole_walkthrough`.

use std::sync::Arc;

use course_geometry::{
    Coordinate, Course, CourseCatalog, CourseService, EngineConfig, Feature, FeatureKind, Hole,
    InMemoryOverrideStore, TeeMarker, Yards,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let course = Course::new("Harbour", "Seaside")
        .with_hole(
            Hole::new(1, 4, Coordinate::new(10.0, 20.0), Coordinate::new(10.0032, 20.0008))
                .with_stroke_index(2)
                .with_tees(vec![
                    TeeMarker::new("Blue", Coordinate::new(10.0, 20.0)).with_yardage(Yards(385.0)),
                    TeeMarker::new("Red", Coordinate::new(10.0006, 20.0001)),
                ])
                .with_feature(Feature::new(FeatureKind::Bunker, Coordinate::new(10.0028, 20.0010)))
                .with_feature(
                    Feature::new(FeatureKind::Fairway, Coordinate::new(10.0016, 20.0004))
                        .with_radius(Yards(30.0)),
                ),
        )
        .with_hole(
            Hole::new(2, 3, Coordinate::new(10.0036, 20.0012), Coordinate::new(10.0046, 20.0025))
                .with_stroke_index(1)
                .with_feature(Feature::new(FeatureKind::Water, Coordinate::new(10.0041, 20.0018))),
        );

    let catalog = CourseCatalog::from_courses(vec![course])?;
    let mut service = CourseService::new(
        Arc::new(catalog),
        InMemoryOverrideStore::new(),
        EngineConfig::default(),
    );

    for summary in service.holes_for_course("Harbour") {
        if let Some(info) = service.resolve_hole_info("Harbour", summary.number, Some("Red")) {
            println!(
                "Hole {}: par {}, {:?} yds ({:?}), SI {:?}",
                info.number, info.par, info.yardage, info.yardage_source, info.stroke_index
            );
        }
    }

    if let Some(bounds) = service.bounds("Harbour") {
        println!("Bounds: {:?} (center {:?})", bounds, bounds.center());
    }

    let spots = [
        ("fairway", Coordinate::new(10.0016, 20.0004)),
        ("bunker", Coordinate::new(10.0028, 20.0010)),
        ("green", Coordinate::new(10.0032, 20.0008)),
        ("rough", Coordinate::new(10.0016, 20.0030)),
    ];
    for (label, spot) in spots {
        println!("{:>8}: {:?}", label, service.classify_lie("Harbour", 1, &spot));
    }

    let moved_green = Coordinate::new(10.0034, 20.0006);
    service.set_tee_green_override("Harbour", 1, Coordinate::new(10.0, 20.0), moved_green);
    println!(
        "After editing hole 1: {:?}, customized holes {:?}",
        service.resolve_tee_green("Harbour", 1, None),
        service.customized_holes("Harbour")
    );
    println!("Hole at moved green: {:?}", service.hole_at_point("Harbour", &moved_green));

    Ok(())
}
