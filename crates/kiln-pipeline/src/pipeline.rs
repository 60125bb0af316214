//! Page orchestration.

use std::collections::HashSet;
use std::path::PathBuf;

use kiln_codegen::{component_name, CodeGenerator, GeneratedPage, ReactGenerator};
use kiln_core::{find_node, DesignNode, DocumentClient, FileResponse, FileSystem, NodeType};
use kiln_extract::TreeWalker;
use kiln_resolver::{GroupAliases, LibraryMap, RunContext};

use crate::error::{PipelineError, Result};
use crate::options::PipelineOptions;

/// Summary of one persisted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub node_id: String,
    /// Component identifier of the generated module.
    pub name: String,
    /// Number of components in the generated trees.
    pub components: usize,
    /// Written files, in write order.
    pub files: Vec<PathBuf>,
}

/// A generated page that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutput {
    pub node_id: String,
    pub components: usize,
    pub page: GeneratedPage,
}

/// Turns the pages of a design file into generated modules.
///
/// A run is all-or-nothing per file: every page is walked and generated
/// before the first file is written, so a client failure anywhere leaves
/// the output directory untouched.
pub struct Pipeline<'a> {
    client: &'a dyn DocumentClient,
    fs: &'a dyn FileSystem,
    walker: TreeWalker<'static>,
    generator: Box<dyn CodeGenerator + 'a>,
    options: PipelineOptions,
    library: LibraryMap,
    aliases: GroupAliases,
}

impl<'a> Pipeline<'a> {
    /// A pipeline generating React modules with the built-in registry.
    pub fn new(client: &'a dyn DocumentClient, fs: &'a dyn FileSystem, options: PipelineOptions) -> Result<Self> {
        let generator = ReactGenerator::standard()?;
        Ok(Self {
            client,
            fs,
            walker: TreeWalker::standard().with_options(options.walk_options()),
            generator: Box::new(generator),
            library: options.load_library()?,
            aliases: options.group_aliases(),
            options,
        })
    }

    /// Replace the code generator.
    pub fn with_generator(mut self, generator: Box<dyn CodeGenerator + 'a>) -> Self {
        self.generator = generator;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Fetch, generate and persist every selected page of `file_key`.
    pub fn process_file(&self, file_key: &str) -> Result<Vec<PageReport>> {
        let outputs = self.render_file(file_key)?;
        self.persist(outputs)
    }

    /// Fetch and generate every selected page of `file_key` without
    /// writing anything.
    pub fn render_file(&self, file_key: &str) -> Result<Vec<PageOutput>> {
        let file = self.client.get_file(file_key)?;
        tracing::info!(file = file_key, name = %file.name, "processing file");

        let styles = self.client.get_file_styles(file_key)?;
        let components = self.client.get_file_components(file_key)?;
        tracing::debug!(
            styles = styles.meta.styles.len(),
            components = components.meta.components.len(),
            "fetched published library"
        );

        let mut ctx = RunContext::for_file(self.client, file_key, &file)
            .with_published_styles(&styles)
            .with_published_components(&components)
            .with_library(self.library.clone())
            .with_aliases(self.aliases.clone());

        let pages = self.select_pages(&file)?;
        let mut names = HashSet::new();
        let mut outputs = Vec::with_capacity(pages.len());
        for page in pages {
            let name = unique_name(&mut names, &page.name);
            outputs.push(self.render_page(page, &name, &mut ctx)?);
        }

        tracing::info!(
            file = file_key,
            pages = outputs.len(),
            variables = ctx.resolved_count(),
            "generated file"
        );
        Ok(outputs)
    }

    /// Walk and generate one page node.
    ///
    /// A canvas (or a canvas-less document) contributes each of its top-level
    /// nodes as a root; any other node is a single root.
    pub fn render_page(&self, page: &DesignNode, name: &str, ctx: &mut RunContext<'_>) -> Result<PageOutput> {
        tracing::info!(page = %page.id, name, "processing page");

        let roots = if matches!(page.node_type, NodeType::Canvas | NodeType::Document) {
            self.walker.walk_all(&page.children, ctx)?
        } else {
            self.walker.walk_all([page], ctx)?
        };
        let components = roots.iter().map(|root| root.node_count()).sum();
        let generated = self.generator.generate(name, &roots)?;

        tracing::info!(
            page = %page.id,
            component = %generated.name,
            framework = self.generator.framework_name(),
            roots = roots.len(),
            components,
            "generated page"
        );
        Ok(PageOutput {
            node_id: page.id.clone(),
            components,
            page: generated,
        })
    }

    /// Write generated pages into the output directory.
    pub fn persist(&self, outputs: Vec<PageOutput>) -> Result<Vec<PageReport>> {
        let dir = &self.options.output_dir;
        self.fs.create_directory(dir)?;

        let mut reports = Vec::with_capacity(outputs.len());
        for output in outputs {
            let mut files = Vec::new();
            for file in output.page.files(self.options.emit_types) {
                let path = dir.join(&file.path);
                self.fs.save_file(&path, &file.content)?;
                files.push(path);
            }
            tracing::info!(component = %output.page.name, files = files.len(), "saved page");
            reports.push(PageReport {
                node_id: output.node_id,
                name: output.page.name,
                components: output.components,
                files,
            });
        }
        Ok(reports)
    }

    fn select_pages<'f>(&self, file: &'f FileResponse) -> Result<Vec<&'f DesignNode>> {
        if self.options.pages.is_empty() {
            let canvases: Vec<&DesignNode> = file
                .document
                .children
                .iter()
                .filter(|node| node.node_type == NodeType::Canvas)
                .collect();
            if canvases.is_empty() {
                tracing::debug!("document has no canvases, treating it as one page");
                return Ok(vec![&file.document]);
            }
            return Ok(canvases);
        }

        self.options
            .pages
            .iter()
            .map(|id| find_node(&file.document, id).ok_or_else(|| PipelineError::PageNotFound(id.clone())))
            .collect()
    }
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("framework", &self.generator.framework_name())
            .field("options", &self.options)
            .field("library", &self.library.len())
            .finish()
    }
}

/// `name`, or `name N` when an earlier page already took its module name.
///
/// Names compare by their component identifier, so `Home` and `home` collide.
fn unique_name(taken: &mut HashSet<String>, name: &str) -> String {
    if taken.insert(component_name(name)) {
        return name.to_string();
    }

    let mut n = 2;
    loop {
        let candidate = format!("{} {}", name, n);
        if taken.insert(component_name(&candidate)) {
            tracing::warn!(name, renamed = %candidate, "duplicate page name");
            return candidate;
        }
        n += 1;
    }
}
