use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use valueguard_core::{ClassDecl, ClassRegistry, Object, Value};
use valueguard_types::{AliasTable, TypeDescriptor, TypeValidator};

const ANNOTATIONS: &[&str] = &[
    "/** @var int */",
    "/** @var int|string|null */",
    "/** @var \\App\\Money|\\App\\Currency|float|bool|null */",
];

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("descriptor_resolve");
    for annotation in ANNOTATIONS {
        group.bench_with_input(BenchmarkId::from_parameter(annotation), annotation, |b, text| {
            b.iter(|| TypeDescriptor::resolve(Some(black_box(*text))))
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let registry = ClassRegistry::new()
        .with(ClassDecl::class("App\\Money"))
        .with(ClassDecl::class("App\\Euro").extends("App\\Money"));
    let aliases = AliasTable::new().with("Cash", "App\\Money");
    let validator = TypeValidator::new(&registry, &aliases);

    let cases = [
        ("primitive", TypeDescriptor::resolve(Some("@var string|int")), Value::from(7)),
        (
            "subclass",
            TypeDescriptor::resolve(Some("@var \\App\\Money")),
            Value::from(Object::new("App\\Euro")),
        ),
        (
            "alias",
            TypeDescriptor::resolve(Some("@var int|Cash")),
            Value::from(Object::new("App\\Euro")),
        ),
    ];

    let mut group = c.benchmark_group("validate");
    for (name, descriptor, value) in &cases {
        group.bench_function(*name, |b| {
            b.iter(|| validator.is_valid(black_box(descriptor), black_box(value)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_validate);
criterion_main!(benches);
