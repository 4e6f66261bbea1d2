//! Built-in demo programs.
//!
//! There is no textual front end, so the CLI ships small programs built
//! with the constructor functions. Each step prints its source form, its
//! reconstruction, and its value; the visible bindings follow at the end.

use std::fmt::Display;
use std::rc::Rc;

use prex_eval::{
    add, bpm, call, call_named, cmp, div, fdiv, lam, lambda, les, modulo, mul, num, show, sub,
    tn, var, xand, xpow, xset, Interpreter, Node, OpKind, Operator, Variable,
};

/// Options shared by every demo run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DemoOptions {
    /// Force re-evaluation on every step instead of reusing caches.
    pub force: bool,
}

/// A named demo program.
pub struct Demo {
    pub name: &'static str,
    pub summary: &'static str,
    run: fn(&mut Session),
}

const DEMOS: &[Demo] = &[
    Demo {
        name: "arith",
        summary: "arithmetic folds and the zero guard",
        run: arith,
    },
    Demo {
        name: "switch",
        summary: "multiway switch with a fallback",
        run: switch,
    },
    Demo {
        name: "square",
        summary: "define a lambda and call it",
        run: square,
    },
    Demo {
        name: "factorial",
        summary: "recursion through a named call",
        run: factorial,
    },
    Demo {
        name: "scoping",
        summary: "call frames shadow and restore bindings",
        run: scoping,
    },
    Demo {
        name: "memo",
        summary: "cached values stay stale until forced",
        run: memo,
    },
    Demo {
        name: "trace",
        summary: "the show operator renders operand values",
        run: trace,
    },
    Demo {
        name: "lazy",
        summary: "deferred operands short-circuit",
        run: lazy,
    },
];

/// Names of every demo, in listing order.
pub fn demo_names() -> impl Iterator<Item = &'static str> {
    DEMOS.iter().map(|demo| demo.name)
}

/// Look up a demo by name.
pub fn find_demo(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

/// Run one demo and return its transcript, or `None` for an unknown name.
pub fn run_demo(name: &str, options: DemoOptions) -> Option<String> {
    find_demo(name).map(|demo| demo.run(options))
}

/// Run every demo, each in a fresh interpreter.
pub fn run_all_demos(options: DemoOptions) -> String {
    DEMOS
        .iter()
        .map(|demo| demo.run(options))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Demo {
    /// Run in a fresh interpreter and return the transcript.
    pub fn run(&self, options: DemoOptions) -> String {
        let _span = tracing::info_span!("demo", demo = self.name, force = options.force).entered();
        let mut session = Session {
            interp: Interpreter::builder().force(options.force).build(),
            out: String::new(),
        };
        session.line(format_args!("== {}: {}", self.name, self.summary));
        (self.run)(&mut session);
        session.bindings();
        session.out
    }
}

struct Session {
    interp: Interpreter,
    out: String,
}

impl Session {
    fn line(&mut self, text: impl Display) {
        self.out.push_str(&text.to_string());
        self.out.push('\n');
    }

    /// Evaluate `node`, recording both renderings and the value.
    fn eval(&mut self, node: &Node) {
        self.line(format_args!("> {}", node.source()));
        self.line(format_args!("  {}", node.reconstruction()));
        let value = self.interp.run(node);
        self.line(format_args!("  = {value}"));
    }

    fn note(&mut self, text: &str) {
        self.line(format_args!("# {text}"));
    }

    fn bindings(&mut self) {
        let bindings = self.interp.namespace().visible_bindings();
        if bindings.is_empty() {
            self.line("bindings: (none)");
            return;
        }
        let rendered: Vec<String> = bindings
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect();
        self.line(format_args!("bindings: {}", rendered.join(", ")));
    }
}

fn arith(s: &mut Session) {
    s.eval(&add([num(2), num(3)]));
    s.eval(&sub([num(10), num(1), num(2)]));
    s.eval(&div([num(7), num(2)]));
    s.eval(&div([num(5), num(0)]));
    s.eval(&fdiv([num(-7), num(2)]));
    s.eval(&modulo([num(-7), num(3)]));
    s.eval(&xpow([num(2), num(3), num(2)]));
    s.eval(&bpm(num(4), num(13), num(497)));
    s.eval(&cmp([num(1), num(2), num(3)]));
}

fn switch(s: &mut Session) {
    s.eval(&tn(
        num(2),
        [(num(1), num(10)), (num(2), num(20))],
        Some(num(0)),
    ));
    s.eval(&tn(num(7), [(num(1), num(10))], Some(num(-1))));
}

fn square(s: &mut Session) {
    let f = lambda("f", ["x"], mul([var("x"), var("x")]));
    s.eval(&Node::from(Rc::clone(&f)));
    s.eval(&call(&f, [num(4)]));
}

fn factorial(s: &mut Session) {
    let body = tn(
        les([var("n"), num(2)]),
        [(num(1), num(1))],
        Some(mul([
            var("n"),
            call_named("fact", [sub([var("n"), num(1)])]),
        ])),
    );
    s.eval(&lam("fact", ["n"], body));
    s.eval(&call_named("fact", [num(10)]));
}

fn scoping(s: &mut Session) {
    s.eval(&xset([(Variable::new("x"), num(1))]));
    let f = lambda("f", ["x"], add([var("x"), var("x")]));
    s.eval(&call(&f, [num(21)]));
    s.note("x is restored after the call");
    s.eval(&var("x"));
}

fn memo(s: &mut Session) {
    s.eval(&xset([(Variable::new("x"), num(2))]));
    let square = mul([var("x"), var("x")]);
    s.eval(&square);
    s.eval(&xset([(Variable::new("x"), num(3))]));
    s.note("unforced runs reuse the cached square; --force recomputes it");
    s.eval(&square);
}

fn trace(s: &mut Session) {
    s.eval(&xset([(Variable::new("y"), num(4))]));
    let node = show([add([num(1), var("y")]), var("y")]);
    s.line(format_args!("before: {}", node.source()));
    s.eval(&node);
    s.line(format_args!("after: {}", node.source()));
    let fresh = show([mul([var("y"), var("y")]), var("y")]);
    let rendered = fresh.source_in(s.interp.namespace_mut());
    s.line(format_args!("evaluated: {rendered}"));
}

fn lazy(s: &mut Session) {
    let node = Node::from(
        Operator::new(
            OpKind::And,
            [num(1), num(0), xset([(Variable::new("touched"), num(1))])],
        )
        .with_pre_evaluate(false),
    );
    s.eval(&node);
    s.note("the third operand never ran, so `touched` is unbound");
    s.eval(&xand([num(1), num(0)]));
}
