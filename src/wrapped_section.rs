use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct WrappedSectionProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

/// Card with a heading and one row per child.
#[function_component(WrappedSection)]
pub(crate) fn wrapped_section(props: &WrappedSectionProps) -> Html {
    html! {
        <section class="card wrapped-section">
            <h3>{ props.title.clone() }</h3>
            <div class="wrapped-items">
                { props.children.clone() }
            </div>
        </section>
    }
}
