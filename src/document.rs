use crate::ProviderTable;
use std::{cell::RefCell, io::Write, rc::Rc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Alert(String),
}

/// Text document built up by the module through `log`, `log_num` and
/// `alert`, one node per call.
///
/// Clones share the same node list, so a clone kept by the host sees what
/// the module appended through the provider table.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Rc<RefCell<Vec<Node>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider_table(&self) -> ProviderTable {
        let log = self.clone();
        let log_num = self.clone();
        let alert = self.clone();
        ProviderTable::new()
            .with_string_func("log", move |text| {
                log.append(Node::Text(text.to_owned()));
                Ok(())
            })
            .with_number_func("log_num", move |n| {
                log_num.append(Node::Text(n.to_string()));
                Ok(())
            })
            .with_string_func("alert", move |text| {
                alert.append(Node::Alert(text.to_owned()));
                Ok(())
            })
    }

    pub fn append(&self, node: Node) {
        self.nodes.borrow_mut().push(node);
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.borrow().clone()
    }

    pub fn text_content(&self) -> String {
        self.nodes
            .borrow()
            .iter()
            .map(|node| match node {
                Node::Text(text) | Node::Alert(text) => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for node in self.nodes.borrow().iter() {
            match node {
                Node::Text(text) => writeln!(writer, "{text}")?,
                Node::Alert(text) => writeln!(writer, "! {text}")?,
            }
        }
        Ok(())
    }
}
