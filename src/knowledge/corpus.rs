//! Hand-authored knowledge bases
//!
//! Loaded synchronously at store construction. One base per target library;
//! the `custom` library intentionally contributes no built-in base.

use super::types::{Complexity, DocumentMetadata, KnowledgeBase, KnowledgeDocument};
use crate::job::ComponentLibrary;

/// All built-in knowledge bases
pub fn builtin() -> Vec<KnowledgeBase> {
    vec![antd(), shadcn()]
}

fn antd() -> KnowledgeBase {
    KnowledgeBase {
        id: "antd".to_string(),
        name: "Ant Design".to_string(),
        description: "Ant Design component library documentation".to_string(),
        library: ComponentLibrary::Antd,
        documents: vec![
            KnowledgeDocument {
                id: "antd-button".to_string(),
                title: "Button".to_string(),
                content: r#"Button triggers an operation.

Basic usage:
import { Button } from 'antd';
<Button type="primary">Primary Button</Button>
<Button>Default Button</Button>
<Button type="dashed">Dashed Button</Button>

Button types:
- primary: the main action of a view
- default: secondary action
- dashed: dashed outline
- link: link button
- text: text button

Button states:
- loading: shows a spinner while an action is pending
- disabled: action unavailable
- danger: destructive action
"#
                .to_string(),
                metadata: DocumentMetadata {
                    component_name: Some("Button".to_string()),
                    category: "General".to_string(),
                    tags: vec![
                        "button".to_string(),
                        "action".to_string(),
                        "trigger".to_string(),
                    ],
                    examples: vec![
                        r#"<Button type="primary">Primary</Button>"#.to_string(),
                        "<Button loading>Loading</Button>".to_string(),
                        "<Button danger>Danger</Button>".to_string(),
                    ],
                    complexity: Complexity::Basic,
                },
            },
            KnowledgeDocument {
                id: "antd-form".to_string(),
                title: "Form".to_string(),
                content: r#"Form collects and validates user input.

Basic usage:
import { Form, Input, Button } from 'antd';

const Demo = () => {
  const [form] = Form.useForm();

  const onFinish = (values) => {
    console.log('Success:', values);
  };

  return (
    <Form form={form} onFinish={onFinish}>
      <Form.Item name="username" rules={[{ required: true }]}>
        <Input placeholder="Username" />
      </Form.Item>
      <Form.Item>
        <Button type="primary" htmlType="submit">
          Submit
        </Button>
      </Form.Item>
    </Form>
  );
};

Validation rules:
- required: mandatory field
- pattern: regular expression check
- validator: custom validation function
"#
                .to_string(),
                metadata: DocumentMetadata {
                    component_name: Some("Form".to_string()),
                    category: "Data Entry".to_string(),
                    tags: vec![
                        "form".to_string(),
                        "input".to_string(),
                        "validation".to_string(),
                    ],
                    examples: vec![],
                    complexity: Complexity::Intermediate,
                },
            },
            KnowledgeDocument {
                id: "antd-table".to_string(),
                title: "Table".to_string(),
                content: r#"Table displays rows of structured data.

Basic usage:
import { Table } from 'antd';

const columns = [
  { title: 'Name', dataIndex: 'name', key: 'name' },
  { title: 'Age', dataIndex: 'age', key: 'age' },
];

<Table columns={columns} dataSource={data} />

Features:
- pagination: built-in page controls via the pagination prop
- sorting: column sorter functions
- rowSelection: checkbox or radio row selection
- loading: skeleton state while data loads
"#
                .to_string(),
                metadata: DocumentMetadata {
                    component_name: Some("Table".to_string()),
                    category: "Data Display".to_string(),
                    tags: vec![
                        "table".to_string(),
                        "grid".to_string(),
                        "list".to_string(),
                        "pagination".to_string(),
                    ],
                    examples: vec![],
                    complexity: Complexity::Intermediate,
                },
            },
        ],
    }
}

fn shadcn() -> KnowledgeBase {
    KnowledgeBase {
        id: "shadcn".to_string(),
        name: "Shadcn UI".to_string(),
        description: "Shadcn UI component library documentation".to_string(),
        library: ComponentLibrary::Shadcn,
        documents: vec![
            KnowledgeDocument {
                id: "shadcn-button".to_string(),
                title: "Button".to_string(),
                content: r#"Button component for triggering actions.

Usage:
import { Button } from "@/components/ui/button"

<Button variant="default">Default</Button>
<Button variant="destructive">Destructive</Button>
<Button variant="outline">Outline</Button>
<Button variant="secondary">Secondary</Button>
<Button variant="ghost">Ghost</Button>
<Button variant="link">Link</Button>

Sizes:
<Button size="default">Default</Button>
<Button size="sm">Small</Button>
<Button size="lg">Large</Button>
<Button size="icon">Icon</Button>
"#
                .to_string(),
                metadata: DocumentMetadata {
                    component_name: Some("Button".to_string()),
                    category: "Components".to_string(),
                    tags: vec![
                        "button".to_string(),
                        "action".to_string(),
                        "ui".to_string(),
                    ],
                    examples: vec![],
                    complexity: Complexity::Basic,
                },
            },
            KnowledgeDocument {
                id: "shadcn-card".to_string(),
                title: "Card".to_string(),
                content: r#"Card groups related content with a header and body.

Usage:
import {
  Card,
  CardContent,
  CardDescription,
  CardHeader,
  CardTitle,
} from "@/components/ui/card"

<Card>
  <CardHeader>
    <CardTitle>Title</CardTitle>
    <CardDescription>Short description</CardDescription>
  </CardHeader>
  <CardContent>
    Body content goes here.
  </CardContent>
</Card>
"#
                .to_string(),
                metadata: DocumentMetadata {
                    component_name: Some("Card".to_string()),
                    category: "Components".to_string(),
                    tags: vec![
                        "card".to_string(),
                        "layout".to_string(),
                        "container".to_string(),
                    ],
                    examples: vec![],
                    complexity: Complexity::Basic,
                },
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bases_have_unique_ids() {
        let bases = builtin();
        for (i, kb) in bases.iter().enumerate() {
            assert!(!bases[..i].iter().any(|other| other.id == kb.id));
            for (j, doc) in kb.documents.iter().enumerate() {
                assert!(!kb.documents[..j].iter().any(|other| other.id == doc.id));
            }
        }
    }

    #[test]
    fn test_each_base_is_library_scoped() {
        let bases = builtin();
        assert_eq!(bases[0].library, ComponentLibrary::Antd);
        assert_eq!(bases[1].library, ComponentLibrary::Shadcn);
        // No built-in base for the custom library
        assert!(!bases
            .iter()
            .any(|kb| kb.library == ComponentLibrary::Custom));
    }
}
