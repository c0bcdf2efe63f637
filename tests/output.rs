use beatbook::output::{format_human, HumanOutput};

#[test]
fn format_human_includes_sections() {
    let mut human = HumanOutput::new("beatbook task add: created t1");
    human.push_summary("id", "t1");
    human.push_detail("Task Created: Your new task has been added to the system.");
    human.push_warning("no task with id t9 (no-op)");
    human.push_next_step("beatbook task list");

    let rendered = format_human(&human);
    assert!(rendered.contains("beatbook task add: created t1"));
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("- id: t1"));
    assert!(rendered.contains("Details:"));
    assert!(rendered.contains("- Task Created: Your new task has been added to the system."));
    assert!(rendered.contains("Warnings:"));
    assert!(rendered.contains("- no task with id t9 (no-op)"));
    assert!(rendered.contains("Next steps:"));
    assert!(rendered.contains("- beatbook task list"));
}

#[test]
fn format_human_omits_empty_sections() {
    let human = HumanOutput::new("beatbook task list: 0 tasks");
    let rendered = format_human(&human);
    assert_eq!(rendered, "beatbook task list: 0 tasks");
}
