use bazel_bridge_core::{Module, Project, Tag};

/// Short tag list for display, e.g. `library, test`
pub fn format_tags(module: &Module) -> String {
    module
        .tags
        .iter()
        .map(|tag| match tag {
            Tag::Library => "library",
            Tag::Application => "application",
            Tag::Test => "test",
            Tag::NoIde => "no-ide",
            Tag::NoBuild => "no-build",
            Tag::Manual => "manual",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_project_summary(project: &Project) {
    println!("🏗️  Workspace: {}", project.workspace_root().display());
    println!("{}", "=".repeat(80));

    for module in project.modules() {
        let marker = if module.is_synthetic { "📁" } else { "📦" };
        println!("{} {} [{}]", marker, module.label, format_tags(module));
        println!("   📂 {}", module.base_directory.display());
        if !module.languages.is_empty() {
            let languages: Vec<&str> = module.languages.iter().map(|l| l.name()).collect();
            println!("   🔤 {}", languages.join(", "));
        }
        if !module.source_set.is_empty() {
            println!(
                "   📄 {} sources in {} roots",
                module.source_set.sources.len(),
                module.source_set.source_roots.len()
            );
        }
        if !module.direct_dependencies.is_empty() {
            println!("   🔗 {} dependencies", module.direct_dependencies.len());
        }
    }

    println!("{}", "=".repeat(80));
    println!(
        "✅ {} modules, {} indexed files",
        project.modules().len(),
        project.source_to_target().len()
    );
}
