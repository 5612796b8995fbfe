use pretty_stack::{StackTraceConfig, StackTraceOption};

fn main() {
    foo();
}

fn foo() {
    bar()
}
fn bar() {
    baz()
}
fn baz() {
    print()
}

fn print() {
    println!("Full:\n{}\n", render(StackTraceConfig::default()));

    let compact = StackTraceConfig::new(vec![
        StackTraceOption::SkipFrames(1),
        StackTraceOption::IncludeSourceCode(false),
        StackTraceOption::IncludePc(false),
        StackTraceOption::ShowFullPath(false),
        StackTraceOption::ChunkSeparator(" ".to_string()),
        StackTraceOption::ChunkIndentation(String::new()),
    ]);
    println!("Compact:\n{}\n", render(compact));

    let one_line = StackTraceConfig::new(vec![
        StackTraceOption::SkipFrames(1),
        StackTraceOption::IncludeSourceCode(false),
        StackTraceOption::IncludePc(false),
        StackTraceOption::ShowFullPath(false),
        StackTraceOption::FrameSeparator(" <- ".to_string()),
        StackTraceOption::ChunkSeparator(" ".to_string()),
        StackTraceOption::ChunkIndentation(String::new()),
    ]);
    println!("One line:\n{}", render(one_line));
}

fn render(config: StackTraceConfig) -> String {
    String::from_utf8_lossy(&pretty_stack::stack_trace(&config)).into_owned()
}
