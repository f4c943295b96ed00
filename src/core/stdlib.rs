//! Built-in node types, host type manifests and graph assets
//!
//! These tables are what the default capability sources scan. A host
//! embedding the interpreter can supply its own sources instead.

use crate::core::capability::{GraphAsset, MemberManifest, NodeType, Param, TypeManifest, TypeShape};
use crate::core::error::FactoryError;
use crate::core::node::{GraphSpec, NodeKind, NodeSpec, PortKind};
use crate::core::value::{Value, ValueType};
use crate::core::variables::VariableScope;

type Build = Result<NodeSpec, FactoryError>;

fn unit(path: &str, title: &str) -> NodeSpec {
    NodeSpec::new(NodeKind::Unit(path.to_string()), title)
}

fn float_in(spec: NodeSpec, key: &str) -> NodeSpec {
    spec.value_in(key, ValueType::Float, Some(Value::Float(0.0)))
}

fn bool_in(spec: NodeSpec, key: &str) -> NodeSpec {
    spec.value_in(key, ValueType::Bool, Some(Value::Bool(false)))
}

/// Constant node of type `ty`
pub fn literal(ty: ValueType) -> NodeSpec {
    let title = format!("{} Literal", ty);
    NodeSpec::new(NodeKind::Literal(ty.clone()), &title).value_out("output", ty)
}

/// Reads variable `name` from `scope`
pub fn get_variable(scope: VariableScope, name: &str, ty: ValueType) -> NodeSpec {
    NodeSpec::new(NodeKind::GetVariable(scope), "Get Variable")
        .value_in("name", ValueType::String, Some(Value::Str(name.to_string())))
        .value_out("value", ty)
}

/// Writes variable `name` in `scope`
pub fn set_variable(scope: VariableScope, name: &str, ty: ValueType) -> NodeSpec {
    NodeSpec::new(NodeKind::SetVariable(scope), "Set Variable")
        .control_in("assign")
        .control_out("assigned")
        .value_in("name", ValueType::String, Some(Value::Str(name.to_string())))
        .value_in("input", ty.clone(), None)
        .value_out("output", ty)
}

// =============================================================================
// NODE TYPES
// =============================================================================

pub fn node_types() -> Vec<NodeType> {
    vec![
        // Events
        NodeType::new("Flow.Events.OnStart", on_start),
        NodeType::new("Flow.Events.OnUpdate", on_update),
        NodeType::new("Flow.Events.EventUnit", event_unit),
        // Control
        NodeType::new("Flow.Control.If", if_unit),
        NodeType::new("Flow.Control.Sequence", sequence),
        NodeType::new("Flow.Control.ForLoop", for_loop),
        NodeType::new("Flow.Control.While", while_loop),
        // Math
        NodeType::new("Flow.Math.ScalarSum", scalar_sum),
        NodeType::new("Flow.Math.ScalarSubtract", scalar_subtract),
        NodeType::new("Flow.Math.ScalarMultiply", scalar_multiply),
        NodeType::new("Flow.Math.ScalarDivide", scalar_divide),
        NodeType::new("Flow.Math.ScalarModulo", scalar_modulo),
        NodeType::new("Flow.Math.ScalarMinimum", scalar_minimum),
        NodeType::new("Flow.Math.ScalarMaximum", scalar_maximum),
        NodeType::new("Flow.Math.ScalarAbsolute", scalar_absolute),
        NodeType::new("Flow.Math.ScalarRound", scalar_round),
        // Logic
        NodeType::new("Flow.Logic.And", and),
        NodeType::new("Flow.Logic.Or", or),
        NodeType::new("Flow.Logic.Negate", negate),
        NodeType::new("Flow.Logic.Equal", equal),
        NodeType::new("Flow.Logic.Greater", greater),
        NodeType::new("Flow.Logic.Less", less),
        // Text
        NodeType::new("Flow.Text.Concat", concat),
        // Variables
        NodeType::new("Flow.Variables.GetVariable", || {
            Ok(get_variable(VariableScope::Graph, "", ValueType::Object))
        }),
        NodeType::new("Flow.Variables.SetVariable", || {
            Ok(set_variable(VariableScope::Graph, "", ValueType::Object))
        }),
        // Nesting
        NodeType::new("Flow.Nesting.SubgraphUnit", || {
            Ok(NodeSpec::composite(None, GraphSpec::new("Subgraph")))
        }),
    ]
}

fn on_start() -> Build {
    Ok(unit("Flow.Events.OnStart", "On Start").control_out("trigger"))
}

fn on_update() -> Build {
    Ok(unit("Flow.Events.OnUpdate", "On Update").control_out("trigger"))
}

fn event_unit() -> Build {
    // Abstract base of the event nodes
    Err(FactoryError::Unconstructible {
        name: "Flow.Events.EventUnit".to_string(),
    })
}

fn if_unit() -> Build {
    let spec = unit("Flow.Control.If", "If").control_in("enter");
    Ok(bool_in(spec, "condition")
        .control_out("ifTrue")
        .control_out("ifFalse"))
}

fn sequence() -> Build {
    Ok(unit("Flow.Control.Sequence", "Sequence")
        .control_in("enter")
        .control_out("0")
        .control_out("1"))
}

fn for_loop() -> Build {
    Ok(unit("Flow.Control.ForLoop", "For Loop")
        .control_in("enter")
        .value_in("firstIndex", ValueType::Int, Some(Value::Int(0)))
        .value_in("lastIndex", ValueType::Int, Some(Value::Int(10)))
        .value_in("step", ValueType::Int, Some(Value::Int(1)))
        .control_out("body")
        .control_out("exit")
        .value_out("currentIndex", ValueType::Int))
}

fn while_loop() -> Build {
    let spec = unit("Flow.Control.While", "While").control_in("enter");
    Ok(bool_in(spec, "condition").control_out("body").control_out("exit"))
}

fn binary_float(path: &str, title: &str, a: &str, b: &str, out: &str) -> NodeSpec {
    float_in(float_in(unit(path, title), a), b).value_out(out, ValueType::Float)
}

fn scalar_sum() -> Build {
    Ok(binary_float("Flow.Math.ScalarSum", "Add", "a", "b", "sum"))
}

fn scalar_subtract() -> Build {
    Ok(binary_float(
        "Flow.Math.ScalarSubtract",
        "Subtract",
        "minuend",
        "subtrahend",
        "difference",
    ))
}

fn scalar_multiply() -> Build {
    Ok(binary_float("Flow.Math.ScalarMultiply", "Multiply", "a", "b", "product"))
}

fn scalar_divide() -> Build {
    Ok(unit("Flow.Math.ScalarDivide", "Divide")
        .value_in("dividend", ValueType::Float, Some(Value::Float(0.0)))
        .value_in("divisor", ValueType::Float, Some(Value::Float(1.0)))
        .value_out("quotient", ValueType::Float))
}

fn scalar_modulo() -> Build {
    Ok(unit("Flow.Math.ScalarModulo", "Modulo")
        .value_in("dividend", ValueType::Float, Some(Value::Float(0.0)))
        .value_in("divisor", ValueType::Float, Some(Value::Float(1.0)))
        .value_out("remainder", ValueType::Float))
}

fn scalar_minimum() -> Build {
    Ok(binary_float("Flow.Math.ScalarMinimum", "Minimum", "a", "b", "minimum"))
}

fn scalar_maximum() -> Build {
    Ok(binary_float("Flow.Math.ScalarMaximum", "Maximum", "a", "b", "maximum"))
}

fn scalar_absolute() -> Build {
    Ok(float_in(unit("Flow.Math.ScalarAbsolute", "Absolute"), "input")
        .value_out("output", ValueType::Float))
}

fn scalar_round() -> Build {
    Ok(float_in(unit("Flow.Math.ScalarRound", "Round"), "input")
        .value_out("output", ValueType::Int))
}

fn and() -> Build {
    Ok(bool_in(bool_in(unit("Flow.Logic.And", "And"), "a"), "b").value_out("result", ValueType::Bool))
}

fn or() -> Build {
    Ok(bool_in(bool_in(unit("Flow.Logic.Or", "Or"), "a"), "b").value_out("result", ValueType::Bool))
}

fn negate() -> Build {
    Ok(bool_in(unit("Flow.Logic.Negate", "Negate"), "input").value_out("output", ValueType::Bool))
}

fn equal() -> Build {
    Ok(unit("Flow.Logic.Equal", "Equal")
        .value_in("a", ValueType::Object, Some(Value::Null))
        .value_in("b", ValueType::Object, Some(Value::Null))
        .value_out("equal", ValueType::Bool))
}

fn greater() -> Build {
    Ok(float_in(float_in(unit("Flow.Logic.Greater", "Greater"), "a"), "b")
        .value_out("comparison", ValueType::Bool))
}

fn less() -> Build {
    Ok(float_in(float_in(unit("Flow.Logic.Less", "Less"), "a"), "b")
        .value_out("comparison", ValueType::Bool))
}

fn concat() -> Build {
    Ok(unit("Flow.Text.Concat", "Concat")
        .value_in("a", ValueType::String, Some(Value::Str(String::new())))
        .value_in("b", ValueType::String, Some(Value::Str(String::new())))
        .value_out("result", ValueType::String))
}

// =============================================================================
// TYPE MANIFESTS
// =============================================================================

const CORE: &str = "Engine.Core";
const MATH: &str = "Engine.Math";
const PHYSICS: &str = "Engine.Physics";

pub fn manifests() -> Vec<TypeManifest> {
    let single = |name| Param::new(name, "Single", ValueType::Float);
    let vector3 = || ValueType::named("Vector3");

    vec![
        TypeManifest::new(CORE, Some("Engine"), "Debug", TypeShape::Class)
            .member(
                MemberManifest::method("Log", vec![Param::new("message", "Object", ValueType::Object)], None)
                    .statik(),
            )
            .member(
                MemberManifest::method(
                    "LogWarning",
                    vec![Param::new("message", "Object", ValueType::Object)],
                    None,
                )
                .statik(),
            ),
        TypeManifest::new(CORE, Some("Engine"), "Transform", TypeShape::Class)
            .member(MemberManifest::property("position", vector3(), true))
            .member(MemberManifest::property("forward", vector3(), false))
            .member(MemberManifest::method(
                "Translate",
                vec![Param::new("translation", "Vector3", vector3())],
                None,
            ))
            .member(MemberManifest::method("internal_Sync", Vec::new(), None)),
        TypeManifest::new(CORE, Some("Engine"), "Time", TypeShape::Class)
            .member(MemberManifest::property("deltaTime", ValueType::Float, false).statik())
            .member(MemberManifest::property("timeScale", ValueType::Float, true).statik()),
        TypeManifest::new(CORE, Some("Engine"), "GameObject", TypeShape::Class)
            .member(MemberManifest::constructor(Vec::new()))
            .member(MemberManifest::constructor(vec![Param::new(
                "name",
                "String",
                ValueType::String,
            )]))
            .member(MemberManifest::method(
                "SetActive",
                vec![Param::new("value", "Boolean", ValueType::Bool)],
                None,
            ))
            .member(MemberManifest::method("GetComponent", Vec::new(), Some(ValueType::Object)).generic())
            .member(MemberManifest::property("name", ValueType::String, true)),
        TypeManifest::new(CORE, Some("System"), "IDisposable", TypeShape::Interface)
            .member(MemberManifest::method("Dispose", Vec::new(), None)),
        TypeManifest::new(CORE, Some("Engine"), "Space", TypeShape::Enum)
            .member(MemberManifest::field("World", ValueType::named("Space"), true).statik()),
        TypeManifest::new(CORE, Some("System.Collections"), "List`1", TypeShape::Class)
            .generic()
            .member(MemberManifest::method("Clear", Vec::new(), None)),
        TypeManifest::new(CORE, Some("Engine.Internal"), "Profiler", TypeShape::Class)
            .member(MemberManifest::method("BeginSample", Vec::new(), None).statik()),
        TypeManifest::new(MATH, Some("Engine"), "Mathf", TypeShape::Struct)
            .member(
                MemberManifest::method(
                    "Clamp",
                    vec![single("value"), single("min"), single("max")],
                    Some(ValueType::Float),
                )
                .statik(),
            )
            .member(
                MemberManifest::method(
                    "Lerp",
                    vec![single("a"), single("b"), single("t")],
                    Some(ValueType::Float),
                )
                .statik(),
            )
            .member(MemberManifest::method("Sin", vec![single("f")], Some(ValueType::Float)).statik())
            .member(MemberManifest::method("Abs", vec![single("f")], Some(ValueType::Float)).statik())
            .member(MemberManifest::field("PI", ValueType::Float, true).statik()),
        TypeManifest::new(MATH, Some("Engine"), "Vector3", TypeShape::Struct)
            .member(MemberManifest::constructor(vec![single("x"), single("y"), single("z")]))
            .member(MemberManifest::field("x", ValueType::Float, false))
            .member(MemberManifest::field("y", ValueType::Float, false))
            .member(MemberManifest::field("z", ValueType::Float, false))
            .member(MemberManifest::property("zero", vector3(), false).statik())
            .member(MemberManifest::property("magnitude", ValueType::Float, false))
            .member(MemberManifest::method("Normalize", Vec::new(), None)),
        TypeManifest::new(PHYSICS, Some("Engine"), "Physics", TypeShape::Class).member(
            MemberManifest::method(
                "Raycast",
                vec![
                    Param::new("origin", "Vector3", vector3()),
                    Param::new("direction", "Vector3", vector3()),
                ],
                Some(ValueType::Bool),
            )
            .statik(),
        ),
    ]
}

// =============================================================================
// GRAPH ASSETS
// =============================================================================

pub fn graph_assets() -> Vec<GraphAsset> {
    vec![
        GraphAsset {
            name: "PlayerMovement".to_string(),
            body: GraphSpec::new("PlayerMovement")
                .define(PortKind::ControlInput, "enter", "Enter")
                .define(PortKind::ControlOutput, "exit", "Exit")
                .define(PortKind::ValueInput, "speed", "Speed"),
        },
        GraphAsset {
            name: "Health".to_string(),
            body: GraphSpec::new("Health")
                .define(PortKind::ValueInput, "damage", "Damage")
                .define(PortKind::ValueOutput, "current", "Current"),
        },
    ]
}
